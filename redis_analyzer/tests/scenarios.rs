//! End-to-end scenarios over the public API

use redis_analyzer::semantic::SemanticErrorKind;
use redis_analyzer::{parse_command, validate, CommandSpecTable, Expression, ValidationResult};

fn analyze(text: &str) -> ValidationResult {
    let (command, errors) = parse_command(text);
    assert!(errors.is_empty(), "{text}: {errors:?}");
    validate(&command.expect("command"), CommandSpecTable::shared())
}

#[test]
fn get_single_key() {
    let (command, errors) = parse_command("GET mykey");
    assert!(errors.is_empty());
    let command = command.expect("command");
    assert_eq!(command.arguments, vec![Expression::identifier("mykey")]);

    let result = validate(&command, CommandSpecTable::shared());
    assert!(result.valid);
    assert_eq!(
        result.command_info.and_then(|info| info.key).as_deref(),
        Some("mykey")
    );
}

#[test]
fn set_with_positive_expiry() {
    let result = analyze("SET key \"value\" EX 60");
    assert!(result.valid, "{:?}", result.errors);
    assert!(result.warnings.is_empty());
}

#[test]
fn set_with_negative_expiry() {
    let result = analyze("SET key \"value\" EX -60");
    assert!(!result.valid);
    assert_eq!(result.error_kinds(), vec![SemanticErrorKind::InvalidValueRange]);
}

#[test]
fn set_with_conflicting_conditions() {
    let result = analyze("SET key \"value\" NX XX");
    assert!(!result.valid);
    assert_eq!(result.error_kinds(), vec![SemanticErrorKind::OptionConflict]);
}

#[test]
fn get_without_key() {
    let result = analyze("GET");
    assert!(!result.valid);
    assert_eq!(result.error_kinds(), vec![SemanticErrorKind::InsufficientArgs]);
    assert!(result.errors[0]
        .message
        .to_lowercase()
        .contains("expected at least 1, got 0"));
}

#[test]
fn unknown_command_has_single_error() {
    let result = analyze("UNKNOWN key");
    assert!(!result.valid);
    assert_eq!(result.error_kinds(), vec![SemanticErrorKind::UnknownCommand]);
    assert!(result.warnings.is_empty());
}

#[test]
fn scan_with_match_and_count() {
    let (command, errors) = parse_command("SCAN 0 MATCH user:* COUNT 10");
    assert!(errors.is_empty());
    let command = command.expect("command");
    assert_eq!(
        command.arguments,
        vec![
            Expression::integer(0),
            Expression::keyword("MATCH"),
            Expression::pattern("user:*"),
            Expression::keyword("COUNT"),
            Expression::integer(10),
        ]
    );
    assert!(validate(&command, CommandSpecTable::shared()).valid);
}

#[test]
fn lowercase_input_resolves_uppercase_names() {
    let result = analyze("zadd board nx 1.5 alice");
    assert_eq!(result.command_info.map(|info| info.name).as_deref(), Some("ZADD"));
}
