//! Syntax error types with positioned messages
//!
//! Every syntax error is accumulated rather than returned early, so the
//! error type is plain data: a kind plus the span of the offending token.

use crate::logging::{codes, Code};
use crate::tokens::TokenKind;
use crate::utils::Span;

/// What went wrong while parsing one statement or argument
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("expected command identifier, got {found}")]
    MissingCommand { found: TokenKind },

    #[error("could not parse {literal:?} as integer")]
    InvalidInteger { literal: String },

    #[error("could not parse {literal:?} as float")]
    InvalidFloat { literal: String },

    #[error("expected ',' in range expression")]
    MissingRangeComma,

    #[error("expected ']'")]
    MissingRangeClose,

    #[error("nested range expressions are not allowed")]
    NestedRange,

    #[error("unexpected token: {found}")]
    UnexpectedToken { found: TokenKind },

    #[error("too many arguments (max {max})")]
    TooManyArguments { max: usize },

    #[error("too many commands (max {max})")]
    TooManyCommands { max: usize },
}

/// A syntax error positioned at the token that was current when it occurred
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Parser error at line {}, column {}: {kind}", .span.start.line, .span.start.column)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The bare message without the position prefix
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match &self.kind {
            SyntaxErrorKind::MissingCommand { .. } => codes::syntax::MISSING_COMMAND,
            SyntaxErrorKind::InvalidInteger { .. } | SyntaxErrorKind::InvalidFloat { .. } => {
                codes::syntax::INVALID_LITERAL
            }
            SyntaxErrorKind::MissingRangeComma
            | SyntaxErrorKind::MissingRangeClose
            | SyntaxErrorKind::NestedRange => codes::syntax::MALFORMED_RANGE,
            SyntaxErrorKind::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            SyntaxErrorKind::TooManyArguments { .. } => codes::syntax::TOO_MANY_ARGUMENTS,
            SyntaxErrorKind::TooManyCommands { .. } => codes::syntax::TOO_MANY_COMMANDS,
        }
    }

    /// Get span of the offending token
    pub fn span(&self) -> Option<Span> {
        Some(self.span)
    }

    /// Resource-limit errors stop statement collection
    pub fn is_limit(&self) -> bool {
        matches!(
            self.kind,
            SyntaxErrorKind::TooManyArguments { .. } | SyntaxErrorKind::TooManyCommands { .. }
        )
    }
}
