use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridflowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid theme: {0} (expected \"light\" or \"dark\")")]
    InvalidTheme(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Auto-save error: {0}")]
    AutoSave(String),
}

pub type Result<T> = std::result::Result<T, GridflowError>;
