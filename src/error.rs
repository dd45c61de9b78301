use miette::Diagnostic;
use thiserror::Error;

/// Main error type for mockup operations
#[derive(Error, Diagnostic, Debug)]
pub enum MockupError {
    #[error("IO error: {0}")]
    #[diagnostic(code(mockup::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(mockup::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(mockup::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(mockup::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unreadable image: {message}")]
    #[diagnostic(code(mockup::decode))]
    Decode { message: String },

    #[error("Storage error: {message}")]
    #[diagnostic(code(mockup::storage))]
    Storage { message: String },

    #[error("Catalog error: {message}")]
    #[diagnostic(code(mockup::catalog))]
    Catalog { message: String },
}

impl MockupError {
    pub(crate) fn io(path: &std::path::Path, context: &str, err: impl std::fmt::Display) -> Self {
        MockupError::Io {
            path: path.to_path_buf(),
            message: format!("{}: {}", context, err),
        }
    }
}

pub type Result<T> = std::result::Result<T, MockupError>;
