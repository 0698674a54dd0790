use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Reqwest Error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Upstream answered {status} for parent {parent_id}")]
    HttpStatus {
        status: reqwest::StatusCode,
        parent_id: String,
    },

    #[error("Couldn't decode JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Input file is missing: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
}
