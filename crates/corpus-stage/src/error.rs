//! Error types for the staging pipeline.

use std::{io, path::PathBuf};

use thiserror::Error;

use corpus_convert::ConvertError;

/// Errors that can occur while staging artifacts.
///
/// Per-document read failures and zero-section documents are not errors:
/// they are logged, recorded in the stats, and the batch continues. Only
/// staging-area failures (directory creation, artifact writes) abort the
/// batch.
#[derive(Debug, Error)]
pub enum StageError {
    /// Failed to create a staging directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write a content or metadata artifact.
    #[error("failed to write artifact {path}: {source}")]
    WriteArtifact {
        /// Artifact path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to serialize a metadata record.
    #[error("failed to serialize metadata for {path}: {source}")]
    Serialize {
        /// Artifact the metadata belongs to.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The conversion pass of an end-to-end run failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}
