//! Errors raised while building a command specification table

use crate::logging::{codes, Code};

pub type SpecResult<T> = Result<T, SpecError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    #[error("Command '{name}' is already registered")]
    DuplicateCommand { name: String },

    #[error("Command '{name}' declares min_args {min} greater than max_args {max}")]
    InvalidArity { name: String, min: usize, max: usize },

    #[error("Command '{name}' key position {position} is outside its {declared} value categories")]
    InvalidKeyPosition {
        name: String,
        position: usize,
        declared: usize,
    },

    #[error("Option '{option}' of command '{name}' conflicts with undeclared option '{conflict}'")]
    UnknownConflict {
        name: String,
        option: String,
        conflict: String,
    },

    #[error("Invalid command specification file: {message}")]
    InvalidSpecFile { message: String },
}

impl SpecError {
    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::DuplicateCommand { .. } => codes::specs::DUPLICATE_COMMAND,
            Self::InvalidArity { .. } => codes::specs::INVALID_ARITY,
            Self::InvalidKeyPosition { .. } => codes::specs::INVALID_KEY_POSITION,
            Self::UnknownConflict { .. } => codes::specs::UNKNOWN_CONFLICT,
            Self::InvalidSpecFile { .. } => codes::specs::INVALID_SPEC_FILE,
        }
    }
}

impl From<toml::de::Error> for SpecError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidSpecFile {
            message: err.to_string(),
        }
    }
}
