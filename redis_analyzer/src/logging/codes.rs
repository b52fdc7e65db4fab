//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! This module combines code constants with their behavioral metadata in one place.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Input file error codes
pub mod io {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const IO_ERROR: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
}

/// Lexical analysis codes
pub mod lexical {
    use super::Code;

    pub const ILLEGAL_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const INPUT_TOO_LARGE: Code = Code::new("E022");
    pub const TOO_MANY_TOKENS: Code = Code::new("E023");
    pub const LITERAL_TOO_LONG: Code = Code::new("E024");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const MISSING_COMMAND: Code = Code::new("E040");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E041");
    pub const INVALID_LITERAL: Code = Code::new("E042");
    pub const MALFORMED_RANGE: Code = Code::new("E043");
    pub const TOO_MANY_ARGUMENTS: Code = Code::new("E044");
    pub const TOO_MANY_COMMANDS: Code = Code::new("E045");
    pub const ERROR_LIMIT_EXCEEDED: Code = Code::new("E046");
}

/// Command specification table error codes
pub mod specs {
    use super::Code;

    pub const DUPLICATE_COMMAND: Code = Code::new("E060");
    pub const INVALID_ARITY: Code = Code::new("E061");
    pub const INVALID_KEY_POSITION: Code = Code::new("E062");
    pub const UNKNOWN_CONFLICT: Code = Code::new("E063");
    pub const INVALID_SPEC_FILE: Code = Code::new("E064");
}

/// Semantic validation codes
pub mod semantic {
    use super::Code;

    pub const UNKNOWN_COMMAND: Code = Code::new("E080");
    pub const INSUFFICIENT_ARGS: Code = Code::new("E081");
    pub const EXCESSIVE_ARGS: Code = Code::new("E082");
    pub const TYPE_MISMATCH: Code = Code::new("E083");
    pub const OPTION_CONFLICT: Code = Code::new("E084");
    pub const MISSING_OPTION_VALUE: Code = Code::new("E085");
    pub const OPTION_TYPE_MISMATCH: Code = Code::new("E086");
    pub const INVALID_VALUE_RANGE: Code = Code::new("E087");

    // Warnings never make a command invalid
    pub const UNKNOWN_OPTION: Code = Code::new("W080");
    pub const LOOSE_OPTION_VALUE: Code = Code::new("W081");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const PARSE_COMPLETE: Code = Code::new("I040");
    pub const SPEC_TABLE_LOADED: Code = Code::new("I060");
    pub const VALIDATION_PASSED: Code = Code::new("I080");
    pub const ANALYSIS_COMPLETE: Code = Code::new("I090");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the failing input",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check logging configuration and environment variables",
            ),
            // Input file errors
            ErrorMetadata::new(
                "E005",
                "Input",
                Severity::Medium,
                false,
                true,
                "Input file not found",
                "Check the file path and try again",
            ),
            ErrorMetadata::new(
                "E006",
                "Input",
                Severity::Medium,
                false,
                true,
                "Input file could not be read",
                "Check file permissions and encoding",
            ),
            ErrorMetadata::new(
                "E007",
                "Input",
                Severity::High,
                false,
                true,
                "Input file exceeds the maximum input size",
                "Split the command file into smaller files",
            ),
            // Lexical
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Illegal character in command text",
                "Remove the character or quote it inside a string",
            ),
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::Low,
                true,
                false,
                "String literal is missing its closing quote",
                "Add the closing double quote",
            ),
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::High,
                false,
                true,
                "Input exceeds the maximum input size",
                "Submit smaller command text",
            ),
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::High,
                false,
                true,
                "Input produces too many tokens",
                "Submit fewer commands per request",
            ),
            ErrorMetadata::new(
                "E024",
                "Lexical",
                Severity::High,
                false,
                true,
                "Literal exceeds the maximum literal length",
                "Shorten the literal",
            ),
            // Syntax
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Command line does not start with a command identifier",
                "Start each line with a command name",
            ),
            ErrorMetadata::new(
                "E041",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Token cannot start an argument",
                "Remove or quote the unexpected token",
            ),
            ErrorMetadata::new(
                "E042",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Numeric literal could not be parsed",
                "Use a decimal integer or float within range",
            ),
            ErrorMetadata::new(
                "E043",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Range expression is malformed",
                "Write ranges as [start, end]",
            ),
            ErrorMetadata::new(
                "E044",
                "Syntax",
                Severity::High,
                false,
                true,
                "Command has too many arguments",
                "Split the command into several smaller ones",
            ),
            ErrorMetadata::new(
                "E045",
                "Syntax",
                Severity::High,
                false,
                true,
                "Program has too many commands",
                "Submit fewer commands per request",
            ),
            ErrorMetadata::new(
                "E046",
                "Syntax",
                Severity::High,
                false,
                true,
                "Parser error history limit reached",
                "Fix the reported errors and retry",
            ),
            // Command specifications
            ErrorMetadata::new(
                "E060",
                "Specs",
                Severity::High,
                false,
                true,
                "Command specified more than once",
                "Remove the duplicate command entry",
            ),
            ErrorMetadata::new(
                "E061",
                "Specs",
                Severity::High,
                false,
                true,
                "Command arity is inconsistent",
                "Ensure min_args does not exceed max_args",
            ),
            ErrorMetadata::new(
                "E062",
                "Specs",
                Severity::High,
                false,
                true,
                "Key position is outside the argument list",
                "Point key_position at a declared argument",
            ),
            ErrorMetadata::new(
                "E063",
                "Specs",
                Severity::High,
                false,
                true,
                "Option conflicts with an undeclared option",
                "Declare the conflicting option on the same command",
            ),
            ErrorMetadata::new(
                "E064",
                "Specs",
                Severity::High,
                false,
                true,
                "Specification file is not valid TOML",
                "Fix the specification file syntax",
            ),
            // Semantic
            ErrorMetadata::new(
                "E080",
                "Semantic",
                Severity::Medium,
                true,
                false,
                "Command is not in the specification table",
                "Check the command name",
            ),
            ErrorMetadata::new(
                "E081",
                "Semantic",
                Severity::Medium,
                true,
                false,
                "Command has too few arguments",
                "Supply the required arguments",
            ),
            ErrorMetadata::new(
                "E082",
                "Semantic",
                Severity::Medium,
                true,
                false,
                "Command has too many arguments",
                "Remove the extra arguments",
            ),
            ErrorMetadata::new(
                "E083",
                "Semantic",
                Severity::Medium,
                true,
                false,
                "Argument has the wrong node type",
                "Use a value of the expected kind",
            ),
            ErrorMetadata::new(
                "E084",
                "Semantic",
                Severity::Medium,
                true,
                false,
                "Mutually exclusive options used together",
                "Keep only one of the conflicting options",
            ),
            ErrorMetadata::new(
                "E085",
                "Semantic",
                Severity::Medium,
                true,
                false,
                "Option requires a value",
                "Supply a value after the option",
            ),
            ErrorMetadata::new(
                "E086",
                "Semantic",
                Severity::Medium,
                true,
                false,
                "Option value has the wrong type",
                "Supply a value of the expected type",
            ),
            ErrorMetadata::new(
                "E087",
                "Semantic",
                Severity::Medium,
                true,
                false,
                "Value is outside its allowed range",
                "Use a positive value",
            ),
            ErrorMetadata::new(
                "W080",
                "Semantic",
                Severity::Low,
                true,
                false,
                "Option is not declared for the command",
                "Check the option name",
            ),
            ErrorMetadata::new(
                "W081",
                "Semantic",
                Severity::Low,
                true,
                false,
                "Option value is loosely typed",
                "Quote the value as a string",
            ),
            // Success codes
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed",
                "No action required",
            ),
            ErrorMetadata::new(
                "I020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Tokenization completed",
                "No action required",
            ),
            ErrorMetadata::new(
                "I040",
                "Syntax",
                Severity::Low,
                true,
                false,
                "Parsing completed",
                "No action required",
            ),
            ErrorMetadata::new(
                "I060",
                "Specs",
                Severity::Low,
                true,
                false,
                "Specification table loaded",
                "No action required",
            ),
            ErrorMetadata::new(
                "I080",
                "Semantic",
                Severity::Low,
                true,
                false,
                "Command passed validation",
                "No action required",
            ),
            ErrorMetadata::new(
                "I090",
                "Pipeline",
                Severity::Low,
                true,
                false,
                "Analysis completed",
                "No action required",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
