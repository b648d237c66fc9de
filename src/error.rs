//! Error types for Vidshelf.

use thiserror::Error;

use crate::video::SUPPORTED_EXTENSIONS;

/// Common error type for Vidshelf.
///
/// The first four variants carry the complete, user-facing message. They are
/// rendered verbatim in the `errorMessage` field of HTTP error responses.
#[derive(Error, Debug)]
pub enum VidshelfError {
    /// A metadata row or its file is missing.
    #[error("{0}")]
    NotFound(String),

    /// The file extension is not in the allow-list.
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// A file with the same name already exists in the upload directory.
    #[error("{0}")]
    AlreadyExists(String),

    /// A file could not be written, read, or deleted.
    #[error("{0}")]
    Io(String),

    /// Database error.
    ///
    /// Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// Validation error for client input that is not a media-type problem.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl VidshelfError {
    /// No metadata row exists for `id`.
    pub fn no_file_for_id(id: i64) -> Self {
        Self::NotFound(format!("There is no file by this file id: {id}"))
    }

    /// The metadata row exists but the file is gone from disk.
    pub fn missing_file(name: &str) -> Self {
        Self::NotFound(format!("Cannot find this file: {name}"))
    }

    /// An upload collides with an existing file.
    pub fn already_exists(name: &str) -> Self {
        Self::AlreadyExists(format!("This file already exists: {name}"))
    }

    /// The extension is not one of [`SUPPORTED_EXTENSIONS`].
    pub fn unsupported_media_type() -> Self {
        Self::UnsupportedMediaType(format!(
            "[{}] type files are only supported.",
            SUPPORTED_EXTENSIONS.join(", ")
        ))
    }

    /// The destination file could not be created or fully written.
    pub fn cannot_write(path: &std::path::Path) -> Self {
        Self::Io(format!(
            "This file cannot be written in this path: {}",
            path.display()
        ))
    }

    /// The OS refused to delete the file.
    pub fn cannot_delete(name: &str) -> Self {
        Self::Io(format!("This file cannot be deleted: {name}"))
    }
}

impl From<std::io::Error> for VidshelfError {
    fn from(e: std::io::Error) -> Self {
        VidshelfError::Io(e.to_string())
    }
}

// Conversion from sqlx errors
impl From<sqlx::Error> for VidshelfError {
    fn from(e: sqlx::Error) -> Self {
        VidshelfError::Database(e.to_string())
    }
}

/// Result type alias for Vidshelf operations.
pub type Result<T> = std::result::Result<T, VidshelfError>;
