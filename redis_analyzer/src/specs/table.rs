//! Command specification types and the frozen lookup table

use crate::log_error;
use crate::specs::error::{SpecError, SpecResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

// ============================================================================
// CATEGORIES
// ============================================================================

/// Expected kind of a positional argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueCategory {
    Key,
    Value,
    Field,
    Score,
    Member,
    Cursor,
    Start,
    Stop,
}

impl ValueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Value => "value",
            Self::Field => "field",
            Self::Score => "score",
            Self::Member => "member",
            Self::Cursor => "cursor",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected kind of the value following a keyword option
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionValueType {
    Integer,
    Pattern,
    String,
    #[default]
    None,
}

// ============================================================================
// SPECIFICATIONS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    #[serde(default)]
    pub has_value: bool,
    #[serde(default)]
    pub value_type: OptionValueType,
    #[serde(default)]
    pub description: String,
    /// Options that may not appear earlier in the same command
    #[serde(default)]
    pub conflicts: Vec<String>,
    /// Integer values must be strictly positive
    #[serde(default)]
    pub positive_only: bool,
}

impl OptionSpec {
    /// Option that stands alone
    pub fn flag(description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..Self::default()
        }
    }

    /// Option followed by one value of the given type
    pub fn valued(value_type: OptionValueType, description: &str) -> Self {
        Self {
            has_value: true,
            value_type,
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn conflicts_with(mut self, options: &[&str]) -> Self {
        self.conflicts = options.iter().map(|o| o.to_ascii_uppercase()).collect();
        self
    }

    pub fn positive(mut self) -> Self {
        self.positive_only = true;
        self
    }
}

/// Arity, positional categories and options of one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub min_args: usize,
    /// `None` means unbounded
    #[serde(default)]
    pub max_args: Option<usize>,
    #[serde(default)]
    pub key_position: Option<usize>,
    #[serde(default)]
    pub value_types: Vec<ValueCategory>,
    #[serde(default)]
    pub options: BTreeMap<String, OptionSpec>,
    #[serde(default)]
    pub description: String,
}

impl CommandSpec {
    pub fn new(name: &str, min_args: usize, max_args: Option<usize>, description: &str) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
            min_args,
            max_args,
            key_position: None,
            value_types: Vec::new(),
            options: BTreeMap::new(),
            description: description.to_string(),
        }
    }

    pub fn with_key(mut self, position: usize) -> Self {
        self.key_position = Some(position);
        self
    }

    pub fn with_value_types(mut self, value_types: &[ValueCategory]) -> Self {
        self.value_types = value_types.to_vec();
        self
    }

    pub fn with_option(mut self, name: &str, option: OptionSpec) -> Self {
        self.options.insert(name.to_ascii_uppercase(), option);
        self
    }

    pub fn has_key(&self) -> bool {
        self.key_position.is_some()
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    /// Uppercase every name so lookups match normalized keyword text
    fn normalized(mut self) -> Self {
        self.name = self.name.to_ascii_uppercase();
        self.options = std::mem::take(&mut self.options)
            .into_iter()
            .map(|(name, mut option)| {
                for conflict in &mut option.conflicts {
                    *conflict = conflict.to_ascii_uppercase();
                }
                (name.to_ascii_uppercase(), option)
            })
            .collect();
        self
    }

    fn check(&self) -> SpecResult<()> {
        if let Some(max) = self.max_args {
            if self.min_args > max {
                return Err(SpecError::InvalidArity {
                    name: self.name.clone(),
                    min: self.min_args,
                    max,
                });
            }
        }

        if let Some(position) = self.key_position {
            if position >= self.value_types.len() {
                return Err(SpecError::InvalidKeyPosition {
                    name: self.name.clone(),
                    position,
                    declared: self.value_types.len(),
                });
            }
        }

        for (option, spec) in &self.options {
            if let Some(conflict) = spec
                .conflicts
                .iter()
                .find(|c| !self.options.contains_key(c.as_str()))
            {
                return Err(SpecError::UnknownConflict {
                    name: self.name.clone(),
                    option: option.clone(),
                    conflict: conflict.clone(),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// Read-only catalogue of command specifications keyed by uppercase name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandSpecTable {
    commands: BTreeMap<String, CommandSpec>,
}

impl CommandSpecTable {
    pub fn builder() -> CommandSpecTableBuilder {
        CommandSpecTableBuilder::default()
    }

    /// Table with the standard commands
    pub fn builtin() -> Self {
        Self {
            commands: super::builtin::builtin_specs()
                .into_iter()
                .map(|spec| (spec.name.clone(), spec))
                .collect(),
        }
    }

    /// Lazily built builtin table shared by every caller
    pub fn shared() -> &'static CommandSpecTable {
        static SHARED: OnceLock<CommandSpecTable> = OnceLock::new();
        SHARED.get_or_init(Self::builtin)
    }

    /// Look up a command; `name` must already be uppercase
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn command_specs(&self) -> &BTreeMap<String, CommandSpec> {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}

/// Collects specifications and freezes them into a table
#[derive(Debug, Default)]
pub struct CommandSpecTableBuilder {
    commands: BTreeMap<String, CommandSpec>,
}

impl CommandSpecTableBuilder {
    /// Start from the standard commands
    pub fn with_builtins() -> Self {
        Self {
            commands: CommandSpecTable::builtin().commands,
        }
    }

    pub fn register(&mut self, spec: CommandSpec) -> SpecResult<&mut Self> {
        let spec = spec.normalized();

        if self.commands.contains_key(&spec.name) {
            let err = SpecError::DuplicateCommand { name: spec.name };
            log_error!(err.error_code(), &err.to_string());
            return Err(err);
        }

        if let Err(err) = spec.check() {
            log_error!(err.error_code(), &err.to_string());
            return Err(err);
        }

        self.commands.insert(spec.name.clone(), spec);
        Ok(self)
    }

    pub fn register_all(
        &mut self,
        specs: impl IntoIterator<Item = CommandSpec>,
    ) -> SpecResult<&mut Self> {
        for spec in specs {
            self.register(spec)?;
        }
        Ok(self)
    }

    pub fn build(self) -> CommandSpecTable {
        CommandSpecTable {
            commands: self.commands,
        }
    }
}
