use thiserror::Error;

#[derive(Error, Debug)]
pub enum AirscoreError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid card config: {0}")]
    InvalidConfig(String),

    #[error("state snapshot parse error: {0}")]
    SnapshotParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AirscoreError>;
