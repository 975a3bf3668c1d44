/// Alias for `Result<T, RecordError>`.
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors that can occur when manipulating records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// An update path walked through a field that is not an object.
    #[error("invalid update path '{path}': '{segment}' is not an object")]
    InvalidPath {
        /// The full dotted path being applied.
        path: String,
        /// The segment that could not be descended into.
        segment: String,
    },

    /// An update path was empty or contained an empty segment.
    #[error("empty segment in update path '{0}'")]
    EmptyPath(String),

    /// The record could not be converted to or from its JSON shape.
    #[error("record serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
