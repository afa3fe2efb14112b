/// Error type for connecting to and probing the document store
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver-level failure (URI parsing, pool construction, I/O)
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The client was built but the server never answered
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
