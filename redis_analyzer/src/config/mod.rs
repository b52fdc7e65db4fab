//! Configuration module for the analyzer
//! Compile-time limits are generated from TOML by build.rs

// Generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("ANALYZER_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("ANALYZER_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(compile_time::lexical::MAX_INPUT_SIZE > 0);
        assert!(compile_time::lexical::MAX_LITERAL_LENGTH <= compile_time::lexical::MAX_INPUT_SIZE);
        assert!(compile_time::syntax::MAX_ERROR_HISTORY > 0);
        assert!(compile_time::syntax::MAX_ARGUMENTS_PER_COMMAND > 0);
        assert!(compile_time::semantic::MAX_ERRORS_PER_COMMAND > 0);
        assert!(compile_time::logging::LOG_BUFFER_SIZE >= 100);
    }

    #[test]
    fn test_source_info_names_profile() {
        let info = super::build_info::source_info();
        assert!(info.ends_with(".toml"));
        assert!(info.contains(super::build_info::profile()));
    }
}
