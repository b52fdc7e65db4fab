//! Structural summary of a parsed command

use crate::grammar::{Expression, RedisCommand};
use serde::Serialize;

/// Shape of one command independent of any command specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSummary {
    pub command: String,
    pub argument_count: usize,
    pub argument_types: Vec<&'static str>,
    /// Keyword-option names in argument order
    pub options: Vec<String>,
    /// First argument looks like a key
    pub has_key: bool,
    /// Some argument is a literal value
    pub has_value: bool,
}

pub fn command_summary(command: &RedisCommand) -> CommandSummary {
    let arguments = &command.arguments;

    CommandSummary {
        command: command.command_name(),
        argument_count: arguments.len(),
        argument_types: arguments.iter().map(Expression::type_name).collect(),
        options: arguments
            .iter()
            .filter_map(|arg| arg.as_keyword().map(str::to_string))
            .collect(),
        has_key: matches!(
            arguments.first(),
            Some(Expression::Identifier(_) | Expression::StringLiteral(_))
        ),
        has_value: arguments.iter().any(|arg| {
            matches!(
                arg,
                Expression::StringLiteral(_)
                    | Expression::IntegerLiteral(_)
                    | Expression::FloatLiteral(_)
            )
        }),
    }
}
