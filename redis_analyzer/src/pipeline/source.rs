//! Reading command files from disk

use crate::config::compile_time::lexical::MAX_INPUT_SIZE;
use crate::logging::{codes, Code};
use crate::{log_debug, log_error};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceFileError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },
}

impl SourceFileError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::FileNotFound { .. } => codes::io::FILE_NOT_FOUND,
            Self::FileTooLarge { .. } => codes::io::FILE_TOO_LARGE,
            Self::InvalidEncoding { .. } | Self::IoError { .. } => codes::io::IO_ERROR,
        }
    }
}

/// Read a UTF-8 file no larger than `max_input_size` bytes
pub fn read_source(path: &Path, max_input_size: usize) -> Result<String, SourceFileError> {
    let display = path.display().to_string();
    let max_size = max_input_size.min(MAX_INPUT_SIZE) as u64;

    let metadata = fs::metadata(path).map_err(|e| io_failure(e, &display))?;
    if metadata.len() > max_size {
        let err = SourceFileError::FileTooLarge {
            size: metadata.len(),
            max_size,
        };
        log_error!(err.error_code(), &err.to_string(), "path" => display);
        return Err(err);
    }

    let source = fs::read_to_string(path).map_err(|e| io_failure(e, &display))?;
    log_debug!("Command file read",
        "path" => display,
        "bytes" => source.len(),
        "lines" => source.lines().count()
    );
    Ok(source)
}

fn io_failure(err: std::io::Error, path: &str) -> SourceFileError {
    let error = match err.kind() {
        ErrorKind::NotFound => SourceFileError::FileNotFound {
            path: path.to_string(),
        },
        ErrorKind::InvalidData => SourceFileError::InvalidEncoding {
            path: path.to_string(),
        },
        _ => SourceFileError::IoError {
            message: format!("{}: {}", path, err),
        },
    };
    log_error!(error.error_code(), &error.to_string(), "path" => path);
    error
}
