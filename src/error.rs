//! Error types for contact-book

use crate::validate::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Contact '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid contact number {index} (expected 1-{len})")]
    InvalidSelection { index: i64, len: usize },

    #[error("Not a valid number: {0:?}")]
    NotANumber(String),

    #[error("Input closed")]
    InputClosed,

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
