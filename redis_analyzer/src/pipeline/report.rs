//! Serializable analysis reports

use crate::grammar::RedisCommand;
use crate::semantic::{self, ValidationResult};
use crate::specs::CommandSpecTable;
use crate::syntax::{command_summary, CommandSummary, SyntaxError};
use crate::tokens::Token;
use serde::Serialize;

/// Outcome of analyzing one command
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// No syntax errors and the validator accepted the command
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_ast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_summary: Option<CommandSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parse_errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
    /// Positioned form of `parse_errors`
    #[serde(skip)]
    pub syntax_errors: Vec<SyntaxError>,
}

impl AnalysisReport {
    /// Validation only runs for commands that parsed without errors
    pub(crate) fn build(
        command: Option<&RedisCommand>,
        errors: &[SyntaxError],
        table: &CommandSpecTable,
    ) -> Self {
        let parse_errors: Vec<String> = errors.iter().map(ToString::to_string).collect();

        match command {
            Some(command) if parse_errors.is_empty() => {
                let validation = semantic::validate(command, table);
                Self {
                    valid: validation.valid,
                    parsed_ast: Some(command.to_text()),
                    validation: Some(validation),
                    command_summary: Some(command_summary(command)),
                    parse_errors,
                    tokens: None,
                    syntax_errors: Vec::new(),
                }
            }
            _ => Self {
                valid: false,
                parsed_ast: None,
                validation: None,
                command_summary: None,
                parse_errors,
                tokens: None,
                syntax_errors: errors.to_vec(),
            },
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Outcome of analyzing newline-separated commands
#[derive(Debug, Clone, Serialize)]
pub struct ProgramReport {
    pub valid: bool,
    /// One report per parsed statement, in source order
    pub commands: Vec<AnalysisReport>,
    /// Every syntax error of the program, including ones outside any statement
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parse_errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
    #[serde(skip)]
    pub syntax_errors: Vec<SyntaxError>,
}

impl ProgramReport {
    pub fn invalid_count(&self) -> usize {
        self.commands.iter().filter(|report| !report.valid).count()
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
