use std::path::PathBuf;
use thiserror::Error;

use crate::api::ApiError;

/// Errors that stop the application before the window opens
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No API key configured. Set CAT_API_KEY or add `api_key` to {0}")]
    MissingApiKey(String),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv { name: String, value: String },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("GUI error: {0}")]
    Iced(#[from] iced::Error),
}
