//! Syntax analysis module - token stream to AST transformation
//!
//! Parsing never aborts: every entry point returns whatever AST could be
//! built alongside the accumulated syntax errors.

mod error;
mod parser;
mod summary;

pub use error::{SyntaxError, SyntaxErrorKind};
pub use parser::Parser;
pub use summary::{command_summary, CommandSummary};

use crate::grammar::{Program, RedisCommand};
use crate::logging::codes;
use crate::{log_debug, log_success};

/// Parse the first command of `text`
pub fn parse_command(text: &str) -> (Option<RedisCommand>, Vec<SyntaxError>) {
    log_debug!("Starting command parse", "bytes" => text.len());

    let mut parser = Parser::new(text);
    let command = parser.parse_command();
    let errors = parser.into_errors();

    if errors.is_empty() {
        if let Some(command) = &command {
            log_success!(codes::success::PARSE_COMPLETE, "Command parsed",
                "command" => command.command_name(),
                "arguments" => command.arguments.len()
            );
        }
    }

    (command, errors)
}

/// Parse newline-separated commands
pub fn parse_program(text: &str) -> (Program, Vec<SyntaxError>) {
    let mut parser = Parser::new(text);
    let program = parser.parse_program();
    let errors = parser.into_errors();

    log_success!(codes::success::PARSE_COMPLETE, "Program parsed",
        "statements" => program.len(),
        "errors" => errors.len()
    );

    (program, errors)
}

/// Validate that every syntax code carries metadata
pub fn init_syntax_logging() -> Result<(), String> {
    let required = [
        codes::syntax::MISSING_COMMAND,
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::INVALID_LITERAL,
        codes::syntax::MALFORMED_RANGE,
        codes::syntax::TOO_MANY_ARGUMENTS,
        codes::syntax::TOO_MANY_COMMANDS,
        codes::syntax::ERROR_LIMIT_EXCEEDED,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Expression;

    #[test]
    fn test_init_validates_codes() {
        assert!(init_syntax_logging().is_ok());
    }

    #[test]
    fn test_round_trip_is_stable() {
        let inputs = [
            "GET mykey",
            "SET key \"value\" EX 60",
            "SET k 'say \"hi\"' PX 100 NX",
            "SCAN 0 MATCH user:* COUNT 10",
            "ZRANGE board [0, -1] WITHSCORES",
            "ZADD board 2.50 alice",
            "KEYS *",
        ];

        for input in inputs {
            let (first, errors) = parse_command(input);
            assert!(errors.is_empty(), "{input}: {errors:?}");
            let first = first.expect("command");

            let (second, errors) = parse_command(&first.to_text());
            assert!(errors.is_empty(), "{input}: {errors:?}");
            assert_eq!(Some(first), second, "{input}");
        }
    }

    #[test]
    fn test_program_text_round_trip() {
        let (program, errors) = parse_program("SET a 1\n\nGET a\nDEL a b");
        assert!(errors.is_empty());
        assert_eq!(program.to_text(), "SET a 1\nGET a\nDEL a b");

        let (again, _) = parse_program(&program.to_text());
        assert_eq!(program, again);
    }

    #[test]
    fn test_parse_program_collects_all_errors() {
        let (program, errors) = parse_program("1 a\nGET )\n2 b");
        assert_eq!(program.len(), 1);
        assert_eq!(program.statements[0].arguments, Vec::<Expression>::new());
        assert_eq!(errors.len(), 3);
    }
}
