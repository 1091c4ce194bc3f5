use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
}

pub type Result<T> = std::result::Result<T, AssistantError>;
