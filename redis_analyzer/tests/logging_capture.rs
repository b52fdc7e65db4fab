//! Log events emitted during analysis, captured in memory
//!
//! This binary installs the global logger, so it holds a single test.

use redis_analyzer::logging::{self, codes, service, LogLevel};
use redis_analyzer::{parse_command, validate, CommandSpecTable};
use std::sync::Arc;

#[test]
fn analysis_emits_coded_events() {
    let (service, memory) = service::create_test_service(LogLevel::Debug);
    logging::init_global_logging_with_service(Arc::new(service)).expect("first install");

    let (command, errors) = parse_command("GET (mykey");
    assert_eq!(errors.len(), 1);
    assert!(memory.has_error_with_code(codes::syntax::UNEXPECTED_TOKEN));

    let result = validate(&command.expect("command"), CommandSpecTable::shared());
    assert!(result.valid);
    assert!(memory.has_success_with_code(codes::success::VALIDATION_PASSED));

    memory.clear();
    let (command, _) = parse_command("ZRANGE z 0 1 LIMIT");
    let result = validate(&command.expect("command"), CommandSpecTable::shared());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(
        memory.get_events_with_code(codes::semantic::UNKNOWN_OPTION).len(),
        1
    );
    assert!(memory.get_errors().is_empty());
}
