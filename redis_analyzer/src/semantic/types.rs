//! Validation verdict types

use crate::config::compile_time::semantic::*;
use crate::logging::{codes, Code};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of semantic rule violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticErrorKind {
    UnknownCommand,
    InsufficientArgs,
    ExcessiveArgs,
    TypeMismatch,
    OptionConflict,
    MissingOptionValue,
    OptionTypeMismatch,
    InvalidValueRange,
}

impl SemanticErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "UNKNOWN_COMMAND",
            Self::InsufficientArgs => "INSUFFICIENT_ARGS",
            Self::ExcessiveArgs => "EXCESSIVE_ARGS",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::OptionConflict => "OPTION_CONFLICT",
            Self::MissingOptionValue => "MISSING_OPTION_VALUE",
            Self::OptionTypeMismatch => "OPTION_TYPE_MISMATCH",
            Self::InvalidValueRange => "INVALID_VALUE_RANGE",
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::UnknownCommand => codes::semantic::UNKNOWN_COMMAND,
            Self::InsufficientArgs => codes::semantic::INSUFFICIENT_ARGS,
            Self::ExcessiveArgs => codes::semantic::EXCESSIVE_ARGS,
            Self::TypeMismatch => codes::semantic::TYPE_MISMATCH,
            Self::OptionConflict => codes::semantic::OPTION_CONFLICT,
            Self::MissingOptionValue => codes::semantic::MISSING_OPTION_VALUE,
            Self::OptionTypeMismatch => codes::semantic::OPTION_TYPE_MISMATCH,
            Self::InvalidValueRange => codes::semantic::INVALID_VALUE_RANGE,
        }
    }
}

impl fmt::Display for SemanticErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule violation; `command` is the uppercase command name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticError {
    pub message: String,
    pub command: String,
    pub kind: SemanticErrorKind,
}

impl SemanticError {
    pub fn new(kind: SemanticErrorKind, command: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            command: command.to_string(),
            kind,
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Semantic error in command '{}': {}", self.command, self.message)
    }
}

/// Metadata about the resolved command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    pub has_key: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub key: Option<String>,
}

/// Verdict for one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<SemanticError>,
    pub warnings: Vec<String>,
    /// Absent when the command is unknown
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub command_info: Option<CommandInfo>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            command_info: None,
        }
    }

    /// Record an error; past the per-command bound only validity changes
    pub(crate) fn push_error(&mut self, error: SemanticError) {
        self.valid = false;
        if self.errors.len() < MAX_ERRORS_PER_COMMAND {
            self.errors.push(error);
        }
    }

    pub(crate) fn push_warning(&mut self, warning: String) {
        if self.warnings.len() < MAX_WARNINGS_PER_COMMAND {
            self.warnings.push(warning);
        }
    }

    pub fn error_kinds(&self) -> Vec<SemanticErrorKind> {
        self.errors.iter().map(|e| e.kind).collect()
    }

    pub fn has_error(&self, kind: SemanticErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }
}
