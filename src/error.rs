use thiserror::Error;

/// Main error type for the matching engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// A raw field carried a value of an unexpected type or range
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// File system errors (config loading)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Dedicated worker pool could not be built
    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Blocking scoring task panicked or was cancelled
    #[error("Scoring task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl EngineError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
