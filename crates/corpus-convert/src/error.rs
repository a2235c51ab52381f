//! Error types for tree conversion.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while converting a document tree.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Failed to create an output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to launch the external converter.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that could not be launched.
        program: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The external converter rejected a file.
    #[error("conversion of {path} failed: {detail}")]
    Failed {
        /// File that could not be converted.
        path: PathBuf,
        /// Converter diagnostic output.
        detail: String,
    },

    /// The converter produced output that is not valid UTF-8.
    #[error("converter output for {path} is not valid UTF-8")]
    NonUtf8 {
        /// File whose output was invalid.
        path: PathBuf,
    },

    /// Failed to write a converted file.
    #[error("failed to write converted file {path}: {source}")]
    WriteOutput {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
