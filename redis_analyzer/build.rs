// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    semantic: SemanticLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_input_size: usize,
    max_token_count: usize,
    max_literal_length: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_error_history: usize,
    max_arguments_per_command: usize,
    max_commands_per_program: usize,
}

#[derive(serde::Deserialize)]
struct SemanticLimits {
    max_errors_per_command: usize,
    max_warnings_per_command: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
    log_buffer_size: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=ANALYZER_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=ANALYZER_CONFIG_DIR");

    let profile = env::var("ANALYZER_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("ANALYZER_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the crate directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_INPUT_SIZE: usize = 64 * 1024 * 1024;
    const ABSOLUTE_MAX_TOKEN_COUNT: usize = 10_000_000;

    if config.lexical.max_input_size == 0 || config.lexical.max_input_size > ABSOLUTE_MAX_INPUT_SIZE
    {
        panic!("LIMITS: max_input_size must be within 1..={}", ABSOLUTE_MAX_INPUT_SIZE);
    }

    if config.lexical.max_token_count == 0 || config.lexical.max_token_count > ABSOLUTE_MAX_TOKEN_COUNT
    {
        panic!("LIMITS: max_token_count must be within 1..={}", ABSOLUTE_MAX_TOKEN_COUNT);
    }

    if config.lexical.max_literal_length > config.lexical.max_input_size {
        panic!("LIMITS: max_literal_length exceeds max_input_size");
    }

    if config.syntax.max_error_history == 0 {
        panic!("LIMITS: max_error_history must be positive");
    }

    if config.syntax.max_arguments_per_command == 0 || config.syntax.max_commands_per_program == 0 {
        panic!("LIMITS: argument and command limits must be positive");
    }

    if config.semantic.max_errors_per_command == 0 {
        panic!("LIMITS: max_errors_per_command must be positive");
    }

    if config.logging.log_buffer_size < 100 || config.logging.log_buffer_size > 100_000 {
        panic!("LIMITS: log_buffer_size must be within 100..=100000");
    }

    if profile == "production" && config.lexical.max_input_size > 1024 * 1024 {
        panic!("PRODUCTION: max_input_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod lexical {{
        pub const MAX_INPUT_SIZE: usize = {};
        pub const MAX_TOKEN_COUNT: usize = {};
        pub const MAX_LITERAL_LENGTH: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_ERROR_HISTORY: usize = {};
        pub const MAX_ARGUMENTS_PER_COMMAND: usize = {};
        pub const MAX_COMMANDS_PER_PROGRAM: usize = {};
    }}

    pub mod semantic {{
        pub const MAX_ERRORS_PER_COMMAND: usize = {};
        pub const MAX_WARNINGS_PER_COMMAND: usize = {};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const LOG_BUFFER_SIZE: usize = {};
    }}
}}
"#,
        profile,
        config.lexical.max_input_size,
        config.lexical.max_token_count,
        config.lexical.max_literal_length,
        config.syntax.max_error_history,
        config.syntax.max_arguments_per_command,
        config.syntax.max_commands_per_program,
        config.semantic.max_errors_per_command,
        config.semantic.max_warnings_per_command,
        config.logging.max_log_message_length,
        config.logging.log_buffer_size,
    );

    fs::write(output_path, constants_code).unwrap();
}
