use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Unknown partitioner: {0}")]
    UnknownPartitioner(String),

    #[error("No tokens available for partitioner '{0}'")]
    NoTokensAvailable(String),

    #[error("Invalid token '{token}' for partitioner '{partitioner}'")]
    InvalidToken { partitioner: String, token: String },

    #[error("Cluster metadata manager is already initialized; sharing it between sessions is not supported")]
    AlreadyInitialized,

    #[error("Keyspace '{0}' not found")]
    KeyspaceNotFound(String),

    #[error("Keyspace resolution error: {0}")]
    KeyspaceResolution(String),

    #[error("Invalid replication: {0}")]
    InvalidReplication(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, TopologyError>;

impl<T> From<std::sync::PoisonError<T>> for TopologyError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}
