use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Settings could not be loaded: {0}")]
    SettingsError(#[from] config::ConfigError),

    #[error("Invalid weight '{name}': {reason}")]
    InvalidWeight { name: String, reason: String },

    #[error("Failed to read roster {path}: {source}")]
    RosterIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScorerError>;
