use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Editor error: {0}")]
    Editor(String),
}

pub type Result<T> = std::result::Result<T, BlogError>;
