//! Configuration module for logging
//!
//! Combines the compile-time logging limits with runtime user preferences.

use crate::config::compile_time::logging::{LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH};
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized")?;

    Ok(())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Get minimum log level (user preference)
pub fn get_min_log_level() -> EventsLogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

/// Check if structured logging is enabled (user preference)
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if console logging is enabled (user preference)
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Get event buffer size for the memory logger (compile-time constant)
pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Get maximum log message length (compile-time constant)
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 100_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_MESSAGE_LENGTH == 0 {
        return Err("Max log message length must be positive".to_string());
    }

    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         === Compile-time ===\n\
         - Log buffer size: {}\n\
         - Max message length: {}\n\
         - Source: {}\n\
         === Runtime ===\n\
         - Min log level: {}\n\
         - Structured logging: {}\n\
         - Console logging: {}",
        LOG_BUFFER_SIZE,
        MAX_LOG_MESSAGE_LENGTH,
        crate::config::build_info::source_info(),
        preferences.min_log_level.as_str(),
        preferences.use_structured_logging,
        preferences.enable_console_logging,
    )
}
