//! # Error Handling
//!
//! Centralized error handling for the `modelink` library. The `Error` enum
//! uses `thiserror` and covers the failure modes the consolidation engine can
//! actually hit at the process level.
//!
//! Note that most failures in a consolidation run are deliberately NOT
//! represented here: snapshot-resolution failures, classification negatives
//! and per-alias link errors are recorded in the manifest as data and never
//! abort the run. The only fatal precondition is the inability to create the
//! consolidation root or its alias areas.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for modelink operations
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to create the consolidation root or one of its alias areas.
    ///
    /// This is the single fatal precondition: nothing is written when the
    /// root itself cannot be set up.
    #[error("Failed to create consolidation directory {path}: {reason}")]
    RootCreate { path: PathBuf, reason: String },

    /// Failed to persist the manifest document.
    #[error("Failed to write manifest {path}: {reason}")]
    ManifestWrite { path: PathBuf, reason: String },

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
