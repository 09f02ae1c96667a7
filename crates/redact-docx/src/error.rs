//! Error types for redact-docx

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocxError>;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Part not found: {0}")]
    MissingPart(String),

    #[error("Part {part} is not valid UTF-8: {source}")]
    Utf8 {
        part: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Malformed markup at byte {offset}: {message}")]
    Malformed { offset: usize, message: String },
}
