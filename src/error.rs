use thiserror::Error;

/// Failures of the key-value slots backing both applications.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access storage slot `{key}`: {source}")]
    Io {
        key: String,
        source: std::io::Error,
    },
    #[error("failed to serialize value for storage slot `{key}`: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    #[error("storage quota exceeded writing `{key}`: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Task title cannot be empty.")]
    EmptyTitle,
}
