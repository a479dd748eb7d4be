use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Malformed schedule item: {0}")]
    MalformedItem(String),

    #[error("Invalid timestamp {value}: {reason}")]
    Timestamp { value: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
