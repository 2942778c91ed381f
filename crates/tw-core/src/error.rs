use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading a story.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The story file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The story document is not valid JSON or does not match the schema.
    #[error("invalid story document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two rooms share the same identifier.
    #[error("duplicate room id: \"{0}\"")]
    DuplicateRoom(String),

    /// The story has no rooms at all.
    #[error("story contains no rooms")]
    EmptyStory,
}
