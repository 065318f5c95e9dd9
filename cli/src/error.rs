use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Der(#[from] der::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("certificate index {index} out of range, the chain has {count}")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("start index {start} is too large to number {count} certificates")]
    IndexOverflow { start: usize, count: usize },
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
