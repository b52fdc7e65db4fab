//! End-to-end analysis: text -> tokens -> AST -> validation

mod error;
mod report;
pub mod source;

pub use error::PipelineError;
pub use report::{AnalysisReport, ProgramReport};
pub use source::{read_source, SourceFileError};

use crate::config::runtime::AnalyzerPreferences;
use crate::lexical;
use crate::logging::codes;
use crate::specs::CommandSpecTable;
use crate::syntax::{Parser, SyntaxError};
use crate::utils::Span;
use crate::{log_debug, log_success};
use std::path::Path;

/// Analyze the first command of `text`
///
/// Only resource-limit violations return `Err`; malformed commands produce
/// an invalid report.
pub fn analyze(
    text: &str,
    table: &CommandSpecTable,
    prefs: &AnalyzerPreferences,
) -> Result<AnalysisReport, PipelineError> {
    let (tokens, metrics) = lexical::scan(text, prefs.max_input_size)?;
    let dump = prefs.include_tokens.then(|| tokens.clone());

    let mut parser = Parser::from_tokens(tokens);
    let command = parser.parse_command();
    let errors = parser.into_errors();

    let mut report = AnalysisReport::build(command.as_ref(), &errors, table);
    report.tokens = dump;

    log_success!(codes::success::ANALYSIS_COMPLETE, "Command analysis completed",
        "valid" => report.valid,
        "tokens" => metrics.total_tokens,
        "parse_errors" => errors.len()
    );

    Ok(report)
}

/// Analyze every command of a multi-line text
pub fn analyze_program(
    text: &str,
    table: &CommandSpecTable,
    prefs: &AnalyzerPreferences,
) -> Result<ProgramReport, PipelineError> {
    let (tokens, metrics) = lexical::scan(text, prefs.max_input_size)?;
    let dump = prefs.include_tokens.then(|| tokens.clone());

    let mut parser = Parser::from_tokens(tokens);
    let program = parser.parse_program();
    let errors = parser.into_errors();

    let commands: Vec<AnalysisReport> = program
        .statements
        .iter()
        .map(|command| {
            let own_errors = errors_within(&errors, command.span);
            AnalysisReport::build(Some(command), &own_errors, table)
        })
        .collect();

    let error_count = errors.len();
    let report = ProgramReport {
        valid: errors.is_empty() && commands.iter().all(|c| c.valid),
        commands,
        parse_errors: errors.iter().map(ToString::to_string).collect(),
        tokens: dump,
        syntax_errors: errors,
    };

    log_success!(codes::success::ANALYSIS_COMPLETE, "Program analysis completed",
        "statements" => program.len(),
        "invalid" => report.invalid_count(),
        "tokens" => metrics.total_tokens,
        "parse_errors" => error_count
    );

    Ok(report)
}

/// Read a command file and analyze it as a program
pub fn analyze_file(
    path: &Path,
    table: &CommandSpecTable,
    prefs: &AnalyzerPreferences,
) -> Result<ProgramReport, PipelineError> {
    log_debug!("Analyzing command file", "path" => path.display());
    let source = read_source(path, prefs.max_input_size)?;
    analyze_program(&source, table, prefs)
}

/// A statement owns the errors on the lines its span covers
///
/// Quoted arguments may hold line breaks, so a statement can cover more than
/// one line. Errors reported at the line end still fall on its last line.
fn errors_within(errors: &[SyntaxError], span: Option<Span>) -> Vec<SyntaxError> {
    match span {
        Some(span) => errors
            .iter()
            .filter(|e| (span.start.line..=span.end.line).contains(&e.span.start.line))
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SemanticErrorKind;
    use assert_matches::assert_matches;

    fn prefs() -> AnalyzerPreferences {
        AnalyzerPreferences::default().with_tokens(false)
    }

    #[test]
    fn test_analyze_valid_command() {
        let table = CommandSpecTable::builtin();
        let report = analyze("SET key \"value\" EX 60", &table, &prefs()).expect("analyzed");
        assert!(report.valid);
        assert_eq!(report.parsed_ast.as_deref(), Some("SET key \"value\" EX 60"));
        assert!(report.tokens.is_none());
        assert_eq!(
            report.command_summary.map(|s| s.options),
            Some(vec!["EX".to_string()])
        );
    }

    #[test]
    fn test_parse_errors_skip_validation() {
        let table = CommandSpecTable::builtin();
        let report = analyze("ZRANGE z [0 1]", &table, &prefs()).expect("analyzed");
        assert!(!report.valid);
        assert!(report.validation.is_none());
        assert!(report.parse_errors[0].starts_with("Parser error at line 1, column 11"));
    }

    #[test]
    fn test_invalid_command_report() {
        let table = CommandSpecTable::builtin();
        let report = analyze("SET key \"value\" EX -60", &table, &prefs()).expect("analyzed");
        assert!(!report.valid);
        let kinds = report.validation.map(|v| v.error_kinds());
        assert_eq!(kinds, Some(vec![SemanticErrorKind::InvalidValueRange]));
    }

    #[test]
    fn test_tokens_included_on_request() {
        let table = CommandSpecTable::builtin();
        let prefs = prefs().with_tokens(true);
        let report = analyze("GET k", &table, &prefs).expect("analyzed");
        assert_eq!(report.tokens.map(|t| t.len()), Some(3));
    }

    #[test]
    fn test_oversized_input_is_an_error() {
        let table = CommandSpecTable::builtin();
        let prefs = prefs().with_max_input_size(3);
        assert_matches!(
            analyze("GET mykey", &table, &prefs),
            Err(PipelineError::LexicalAnalysis(_))
        );
    }

    #[test]
    fn test_program_attributes_errors_to_lines() {
        let table = CommandSpecTable::builtin();
        let report =
            analyze_program("GET a\nGET (b\n42\nDEL x", &table, &prefs()).expect("analyzed");
        assert!(!report.valid);
        assert_eq!(report.commands.len(), 3);
        let valid: Vec<bool> = report.commands.iter().map(|c| c.valid).collect();
        assert_eq!(valid, vec![true, false, true]);
        assert_eq!(report.parse_errors.len(), 2);
        assert_eq!(report.invalid_count(), 1);
    }

    #[test]
    fn test_errors_inside_multiline_string_statement() {
        let table = CommandSpecTable::builtin();
        let report =
            analyze_program("SET k \"a\nb\" (\nGET c", &table, &prefs()).expect("analyzed");
        assert!(!report.valid);
        assert_eq!(report.commands.len(), 2);

        let set = &report.commands[0];
        assert!(!set.valid);
        assert!(set.validation.is_none());
        assert_eq!(set.parse_errors.len(), 1);
        assert!(set.parse_errors[0].starts_with("Parser error at line 2, column 4"));

        assert!(report.commands[1].valid);
        assert!(report.commands[1].parse_errors.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let table = CommandSpecTable::builtin();
        let report = analyze("GET mykey", &table, &prefs()).expect("analyzed");
        let json: serde_json::Value =
            serde_json::from_str(&report.to_json(false).expect("json")).expect("parse");
        assert_eq!(json["valid"], serde_json::Value::Bool(true));
        assert_eq!(json["validation"]["command_info"]["key"], "mykey");
        assert!(json.get("parse_errors").is_none());
    }
}
