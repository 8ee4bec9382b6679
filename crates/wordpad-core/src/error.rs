use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("command `{0}` requires an argument")]
    MissingArgument(String),
    #[error("position does not address a text leaf: {0}")]
    InvalidPosition(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access preference file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference data is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("no configuration directory is available on this platform")]
    NoConfigDir,
}

#[derive(Debug, Error)]
pub enum ValueError {
    #[error("document JSON is malformed")]
    Json(#[from] serde_json::Error),
    #[error("unsupported document schema `{0}`")]
    UnsupportedSchema(String),
    #[error("unsupported document version {0}")]
    UnsupportedVersion(u32),
}
