//! Error types for the cut engine

use thiserror::Error;

/// Cut engine error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A cut name that the species chain does not define.
    ///
    /// Only the checked chain API reports this; the plain API rejects the
    /// candidate instead.
    #[error("Unknown {species} cut: '{name}'")]
    UnknownCut {
        /// Species whose chain was queried.
        species: crate::Species,
        /// The unrecognized name as given by the caller.
        name: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
