//! Logging service and logger implementations

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with configuration awareness
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    /// Create new logging service with specified logger and minimum level
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create service with configuration-aware settings
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if !config::use_console_logging() {
            Arc::new(MemoryLogger::new())
        } else if config::use_structured_logging() {
            Arc::new(StructuredLogger::new(min_level))
        } else {
            Arc::new(ConsoleLogger::new(min_level))
        };

        Self::new(logger, min_level)
    }

    /// Check if level should be logged
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    /// Log an event
    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    /// Convenience method: log error with code
    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    /// Convenience method: log success
    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }
}

/// Console logger writing human-readable lines to stderr
///
/// Stdout is reserved for analysis output, so every level goes to stderr.
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            eprintln!("{}", event.format());
        }
    }
}

/// Structured logger emitting one JSON object per line on stderr
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            match event.format_json() {
                Ok(json) => eprintln!("{}", json),
                // Fallback to regular format if JSON serialization fails
                Err(_) => eprintln!("{}", event.format()),
            }
        }
    }
}

/// Memory logger for testing, bounded by the compile-time buffer size
pub struct MemoryLogger {
    events: Mutex<VecDeque<LogEvent>>,
    capacity: usize,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::with_capacity(config::get_error_buffer_size())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEvent>> {
        // A panic while holding the lock leaves the buffer usable
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| e.is_error()).cloned().collect()
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_error() && e.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_info() && e.code == code)
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

/// Create the service described by the runtime logging preferences
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

/// Create a memory-backed service for tests
pub fn create_test_service(min_level: LogLevel) -> (LoggingService, Arc<MemoryLogger>) {
    let memory = Arc::new(MemoryLogger::new());
    let service = LoggingService::new(memory.clone(), min_level);
    (service, memory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_memory_logger_records_events() {
        let (service, memory) = create_test_service(LogLevel::Debug);

        service.log_error(codes::semantic::OPTION_CONFLICT, "Option 'XX' conflicts with 'NX'");
        service.log_success(codes::success::VALIDATION_PASSED, "GET validated");

        assert_eq!(memory.event_count(), 2);
        assert!(memory.has_error_with_code(codes::semantic::OPTION_CONFLICT));
        assert!(memory.has_success_with_code(codes::success::VALIDATION_PASSED));
        assert_eq!(memory.get_errors().len(), 1);
    }

    #[test]
    fn test_log_level_filtering() {
        let (service, memory) = create_test_service(LogLevel::Warning);

        service.log_event(LogEvent::debug("dropped"));
        service.log_event(LogEvent::info("dropped"));
        service.log_event(LogEvent::warning("kept"));

        assert_eq!(memory.event_count(), 1);
        assert!(service.should_log(LogLevel::Error));
        assert!(!service.should_log(LogLevel::Info));
    }

    #[test]
    fn test_memory_logger_is_bounded() {
        let memory = MemoryLogger::with_capacity(3);
        for i in 0..5 {
            memory.log(&LogEvent::info(&format!("event {}", i)));
        }

        let events = memory.get_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].message, "event 2");

        memory.clear();
        assert_eq!(memory.event_count(), 0);
    }

    #[test]
    fn test_console_and_structured_loggers_do_not_panic() {
        let event = LogEvent::error(codes::system::INTERNAL_ERROR, "boom");
        ConsoleLogger::new(LogLevel::Error).log(&event);
        StructuredLogger::new(LogLevel::Error).log(&event);
    }
}
