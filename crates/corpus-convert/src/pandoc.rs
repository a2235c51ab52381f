//! Pandoc-backed document conversion.

use std::{path::Path, process::Command};

use crate::{ConvertError, DocumentConverter};

/// Converts documents by shelling out to the `pandoc` binary.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    /// Program name or path to invoke.
    program: String,
}

impl Default for PandocConverter {
    fn default() -> Self {
        Self {
            program: "pandoc".to_string(),
        }
    }
}

impl PandocConverter {
    /// Creates a converter invoking `pandoc` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter invoking a specific pandoc binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl DocumentConverter for PandocConverter {
    fn convert(&self, source: &Path, from: &str, to: &str) -> Result<String, ConvertError> {
        let output = Command::new(&self.program)
            .arg("--from")
            .arg(from)
            .arg("--to")
            .arg(to)
            .arg(source)
            .output()
            .map_err(|err| ConvertError::Spawn {
                program: self.program.clone(),
                source: err,
            })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                path: source.to_path_buf(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| ConvertError::NonUtf8 {
            path: source.to_path_buf(),
        })
    }
}
