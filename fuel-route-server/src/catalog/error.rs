//! Station catalog error types.

/// Errors that can occur when loading or querying the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Reading the catalog file failed
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Failed to parse catalog JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The backing store could not answer a query
    #[error("catalog unavailable: {message}")]
    Unavailable { message: String },
}
