//! Semantic validation of parsed commands
//!
//! Validation is pure: it reads a command and a specification table and
//! returns a fresh [`ValidationResult`]. Nothing is shared between calls.

mod options;
mod types;
mod validator;

pub use types::{CommandInfo, SemanticError, SemanticErrorKind, ValidationResult};
pub use validator::Validator;

use crate::grammar::{Program, RedisCommand};
use crate::logging::codes;
use crate::specs::CommandSpecTable;

pub fn validate(command: &RedisCommand, table: &CommandSpecTable) -> ValidationResult {
    Validator::new(table).validate(command)
}

pub fn validate_program(program: &Program, table: &CommandSpecTable) -> Vec<ValidationResult> {
    Validator::new(table).validate_program(program)
}

/// Validate that every semantic code carries metadata
pub fn init_semantic_logging() -> Result<(), String> {
    let required = [
        codes::semantic::UNKNOWN_COMMAND,
        codes::semantic::INSUFFICIENT_ARGS,
        codes::semantic::EXCESSIVE_ARGS,
        codes::semantic::TYPE_MISMATCH,
        codes::semantic::OPTION_CONFLICT,
        codes::semantic::MISSING_OPTION_VALUE,
        codes::semantic::OPTION_TYPE_MISMATCH,
        codes::semantic::INVALID_VALUE_RANGE,
        codes::semantic::UNKNOWN_OPTION,
        codes::semantic::LOOSE_OPTION_VALUE,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Semantic code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}
