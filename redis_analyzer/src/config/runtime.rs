// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

use crate::config::compile_time::lexical::MAX_INPUT_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerPreferences {
    /// Largest input accepted by the pipeline, never above the compile-time limit
    pub max_input_size: usize,

    /// Whether to attach the token stream to analysis reports
    pub include_tokens: bool,

    /// Whether CLI JSON output is pretty-printed
    pub pretty_json: bool,
}

impl Default for AnalyzerPreferences {
    fn default() -> Self {
        Self {
            max_input_size: env::var(env_vars::MAX_INPUT_SIZE)
                .ok()
                .and_then(|v| v.parse().ok())
                .map(|size: usize| size.min(MAX_INPUT_SIZE))
                .unwrap_or(MAX_INPUT_SIZE),
            include_tokens: env::var(env_vars::INCLUDE_TOKENS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            pretty_json: env::var(env_vars::PRETTY_JSON)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl AnalyzerPreferences {
    /// Preferences with token output switched on
    pub fn with_tokens(mut self, include_tokens: bool) -> Self {
        self.include_tokens = include_tokens;
        self
    }

    /// Preferences with a custom input limit, clamped to the compile-time maximum
    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size.min(MAX_INPUT_SIZE);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOG_FORMAT)
                .ok()
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOG_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOG_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub analyzer: AnalyzerPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Analyzer
    pub const MAX_INPUT_SIZE: &str = "ANALYZER_MAX_INPUT_SIZE";
    pub const INCLUDE_TOKENS: &str = "ANALYZER_INCLUDE_TOKENS";
    pub const PRETTY_JSON: &str = "ANALYZER_PRETTY_JSON";

    // Logging
    pub const LOG_LEVEL: &str = "ANALYZER_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "ANALYZER_LOG_FORMAT";
    pub const LOG_CONSOLE: &str = "ANALYZER_LOG_CONSOLE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level_accepts_names_and_digits() {
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("Debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_log_levels_are_ordered() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Debug);
    }

    #[test]
    fn test_max_input_size_is_clamped() {
        let prefs = AnalyzerPreferences::default().with_max_input_size(usize::MAX);
        assert_eq!(prefs.max_input_size, MAX_INPUT_SIZE);

        let prefs = AnalyzerPreferences::default().with_max_input_size(16);
        assert_eq!(prefs.max_input_size, 16);
    }
}
