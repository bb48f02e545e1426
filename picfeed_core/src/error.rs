use thiserror::Error;

/// Failures turning the persisted blob into posts and back.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("persisted feed is not valid post data: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to serialize feed: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage connection poisoned")]
    Poisoned,
}

/// Reasons an uploaded file cannot become a post image.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}
