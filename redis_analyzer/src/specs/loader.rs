//! Extra command definitions from TOML
//!
//! ```toml
//! [[command]]
//! name = "INCRBY"
//! min_args = 2
//! max_args = 2
//! key_position = 0
//! value_types = ["key", "score"]
//! description = "Increment the integer value of a key"
//!
//! [command.options.EX]
//! has_value = true
//! value_type = "integer"
//! positive_only = true
//! ```

use crate::log_debug;
use crate::specs::error::SpecResult;
use crate::specs::table::CommandSpec;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SpecFile {
    #[serde(default)]
    command: Vec<CommandSpec>,
}

/// Parse command definitions; table-level checks happen on registration
pub fn load_specs(toml_text: &str) -> SpecResult<Vec<CommandSpec>> {
    let file: SpecFile = toml::from_str(toml_text)?;
    log_debug!("Loaded command definitions", "count" => file.command.len());
    Ok(file.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::{CommandSpecTableBuilder, OptionValueType, SpecError, ValueCategory};
    use assert_matches::assert_matches;

    const INCRBY: &str = r#"
[[command]]
name = "incrby"
min_args = 2
max_args = 2
key_position = 0
value_types = ["key", "score"]
description = "Increment the integer value of a key"

[command.options.ex]
has_value = true
value_type = "integer"
positive_only = true
"#;

    #[test]
    fn test_load_and_register() {
        let specs = load_specs(INCRBY).expect("valid toml");
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].value_types, vec![ValueCategory::Key, ValueCategory::Score]);

        let mut builder = CommandSpecTableBuilder::with_builtins();
        assert!(builder.register_all(specs).is_ok());
        let table = builder.build();

        let incrby = table.get("INCRBY").expect("registered");
        let ex = incrby.option("EX").expect("uppercased option");
        assert_eq!(ex.value_type, OptionValueType::Integer);
        assert!(ex.positive_only);
        assert!(table.get("GET").is_some());
    }

    #[test]
    fn test_empty_file_has_no_commands() {
        assert_eq!(load_specs("").map(|s| s.len()), Ok(0));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let text = "[[command]]\nname = \"X\"\nmin_args = 0\nvalue_types = [\"blob\"]\n";
        assert_matches!(load_specs(text), Err(SpecError::InvalidSpecFile { .. }));
    }
}
