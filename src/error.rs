//! Error types for folio operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or writing a manuscript.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid project descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Project descriptor not found: {}", .0.display())]
    MissingProject(PathBuf),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
