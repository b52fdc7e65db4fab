use crate::lexical::LexerError;
use crate::logging::Code;
use crate::pipeline::source::SourceFileError;
use crate::specs::SpecError;

/// Failures that stop an analysis before any verdict exists
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Reading input failed: {0}")]
    SourceFile(#[from] SourceFileError),

    #[error("Loading command specifications failed: {0}")]
    Specs(#[from] SpecError),
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::LexicalAnalysis(err) => err.error_code(),
            Self::SourceFile(err) => err.error_code(),
            Self::Specs(err) => err.error_code(),
        }
    }
}
