use miette::Diagnostic;
use thiserror::Error;

/// Main error type for spritecut operations
#[derive(Error, Diagnostic, Debug)]
pub enum CutError {
    #[error("IO error: {0}")]
    #[diagnostic(code(spritecut::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(spritecut::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Decode error: {message}")]
    #[diagnostic(code(spritecut::decode))]
    Decode {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Encode error: {message}")]
    #[diagnostic(code(spritecut::encode))]
    Encode { message: String },

    #[error("Config error: {message}")]
    #[diagnostic(code(spritecut::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(spritecut::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, CutError>;
