// Internal modules
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod semantic;
pub mod specs;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use grammar::{Expression, Program, RedisCommand};
pub use pipeline::{analyze, analyze_file, analyze_program, AnalysisReport, PipelineError, ProgramReport};
pub use semantic::{validate, validate_program, SemanticErrorKind, ValidationResult};
pub use specs::{command_specs, CommandSpec, CommandSpecTable};
pub use syntax::{parse_command, parse_program, SyntaxError};

/// Run every module's code registry check
pub fn init_analyzer_logging() -> Result<(), String> {
    lexical::init_lexical_analysis_logging()?;
    syntax::init_syntax_logging()?;
    semantic::init_semantic_logging()?;
    Ok(())
}
