//! Lexical analysis module
//!
//! Wraps the lazy [`Tokenizer`] with the resource checks the pipeline runs
//! before any parsing happens.

pub mod tokenizer;

use crate::config::compile_time::lexical::*;
use crate::logging::codes;
use crate::tokens::Token;
use crate::{log_debug, log_error, log_success};

pub use tokenizer::{LexerError, LexicalMetrics, Tokenizer};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize a whole text; the result always ends with one `EOF` token
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::tokenize_all(text)
}

/// Reject input larger than `max_input_size` (itself capped at compile time)
pub fn check_input_size(text: &str, max_input_size: usize) -> Result<(), LexerError> {
    let max = max_input_size.min(MAX_INPUT_SIZE);
    if text.len() > max {
        let err = LexerError::InputTooLarge {
            size: text.len(),
            max,
        };
        log_error!(err.error_code(), &err.to_string(), "size" => text.len(), "max" => max);
        return Err(err);
    }
    Ok(())
}

/// Tokenize with resource limits, returning the tokens and scan metrics
pub fn scan(text: &str, max_input_size: usize) -> Result<(Vec<Token>, LexicalMetrics), LexerError> {
    check_input_size(text, max_input_size)?;

    log_debug!("Starting lexical analysis",
        "bytes" => text.len(),
        "max_tokens_allowed" => MAX_TOKEN_COUNT
    );

    let mut tokenizer = Tokenizer::new(text);
    let mut tokens = Vec::new();

    for token in tokenizer.by_ref() {
        if tokens.len() >= MAX_TOKEN_COUNT {
            let err = LexerError::TooManyTokens {
                count: tokens.len() + 1,
            };
            log_error!(err.error_code(), &err.to_string());
            return Err(err);
        }
        if token.literal.len() > MAX_LITERAL_LENGTH {
            let err = LexerError::LiteralTooLong {
                length: token.literal.len(),
                position: token.position,
            };
            log_error!(err.error_code(), &err.to_string(), span = token.span());
            return Err(err);
        }
        tokens.push(token);
    }

    let metrics = tokenizer.metrics().clone();
    log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
        "tokens" => metrics.total_tokens,
        "illegal" => metrics.illegal_tokens,
        "unterminated_strings" => metrics.unterminated_strings
    );

    Ok((tokens, metrics))
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Validate that every lexical code carries metadata
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let required = [
        codes::lexical::ILLEGAL_CHARACTER,
        codes::lexical::UNTERMINATED_STRING,
        codes::lexical::INPUT_TOO_LARGE,
        codes::lexical::TOO_MANY_TOKENS,
        codes::lexical::LITERAL_TOO_LONG,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("Lexical limits initialized",
        "max_input_size" => MAX_INPUT_SIZE,
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_literal_length" => MAX_LITERAL_LENGTH
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    #[test]
    fn test_init_validates_codes() {
        assert!(init_lexical_analysis_logging().is_ok());
    }

    #[test]
    fn test_scan_returns_tokens_and_metrics() {
        let (tokens, metrics) = scan("GET mykey", MAX_INPUT_SIZE).expect("within limits");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        assert_eq!(metrics.identifier_tokens, 2);
    }

    #[test]
    fn test_scan_rejects_oversized_input() {
        let result = scan("GET mykey", 4);
        assert_matches!(result, Err(LexerError::InputTooLarge { size: 9, max: 4 }));
    }

    #[test]
    fn test_runtime_limit_cannot_exceed_compile_time_limit() {
        let text = "a".repeat(16);
        assert!(check_input_size(&text, usize::MAX).is_ok());
        assert!(check_input_size(&text, 15).is_err());
    }

    #[test]
    fn test_scan_rejects_long_literal() {
        let text = format!("GET \"{}\"", "x".repeat(MAX_LITERAL_LENGTH + 1));
        if text.len() <= MAX_INPUT_SIZE {
            assert_matches!(
                scan(&text, MAX_INPUT_SIZE),
                Err(LexerError::LiteralTooLong { .. })
            );
        }
    }
}
