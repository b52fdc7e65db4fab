//! Global logging module for the command analyzer
//!
//! Provides thread-safe global logging with coded events and a small
//! macro interface used by every analysis stage.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system from runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    // Validate error code system
    let required_codes = [
        codes::system::INTERNAL_ERROR,
        codes::lexical::ILLEGAL_CHARACTER,
        codes::syntax::UNEXPECTED_TOKEN,
        codes::specs::DUPLICATE_COMMAND,
        codes::semantic::UNKNOWN_COMMAND,
    ];
    for code in required_codes {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized")?;

    Ok(())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    if let Some(logger) = try_get_global_logger() {
        let mut event = LogEvent::error(code, message);

        if let Some(s) = span {
            event = event.with_span(s);
        }

        for (key, value) in context {
            event = event.with_context(key, value);
        }

        logger.log_event(event);
    }
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        let mut event = LogEvent::success(code, message);

        for (key, value) in context {
            event = event.with_context(key, value);
        }

        logger.log_event(event);
    }
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        let mut event = LogEvent::info(message);

        for (key, value) in context {
            event = event.with_context(key, value);
        }

        logger.log_event(event);
    }
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}
