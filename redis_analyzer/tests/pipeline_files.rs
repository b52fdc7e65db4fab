//! File-driven analysis

use redis_analyzer::config::runtime::AnalyzerPreferences;
use redis_analyzer::pipeline::{analyze_file, PipelineError, SourceFileError};
use redis_analyzer::CommandSpecTable;
use std::io::Write;

fn prefs() -> AnalyzerPreferences {
    AnalyzerPreferences::default().with_tokens(false)
}

#[test]
fn analyzes_each_line_of_a_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "SET session \"token\" EX 3600").expect("write");
    writeln!(file).expect("write");
    writeln!(file, "GET session").expect("write");
    writeln!(file, "ZADD board 1 alice").expect("write");

    let report = analyze_file(file.path(), CommandSpecTable::shared(), &prefs()).expect("report");
    assert!(report.valid);
    assert_eq!(report.commands.len(), 3);
    assert!(report.parse_errors.is_empty());
}

#[test]
fn invalid_lines_are_reported_individually() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "GET a\nSET a b NX XX\n99 bottles\nHGET h").expect("write");

    let report = analyze_file(file.path(), CommandSpecTable::shared(), &prefs()).expect("report");
    assert!(!report.valid);
    let valid: Vec<bool> = report.commands.iter().map(|c| c.valid).collect();
    assert_eq!(valid, vec![true, false, false]);
    assert_eq!(report.parse_errors.len(), 1);
    assert!(report.parse_errors[0].contains("line 3"));

    let json: serde_json::Value =
        serde_json::from_str(&report.to_json(false).expect("json")).expect("parse");
    assert_eq!(json["commands"][1]["validation"]["errors"][0]["kind"], "OPTION_CONFLICT");
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = analyze_file(
        &dir.path().join("missing.redis"),
        CommandSpecTable::shared(),
        &prefs(),
    );
    assert!(matches!(
        result,
        Err(PipelineError::SourceFile(SourceFileError::FileNotFound { .. }))
    ));
}

#[test]
fn file_over_runtime_limit_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "DEL {}", "k ".repeat(64)).expect("write");

    let prefs = prefs().with_max_input_size(16);
    let result = analyze_file(file.path(), CommandSpecTable::shared(), &prefs);
    assert!(matches!(
        result,
        Err(PipelineError::SourceFile(SourceFileError::FileTooLarge { .. }))
    ));
}
