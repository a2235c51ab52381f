//! Plain-text annotate pass.
//!
//! Chat-transcript exports are already plain text: they are staged
//! verbatim, one metadata sibling per file, with no splitting. The
//! metadata carries the transcript's published URL and the annotate
//! `data_source` label so the indexer can distinguish transcript passages
//! from documentation sections.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use corpus_config::Config;

use crate::{SectionMetadata, StageError};

/// Statistics from one annotate pass.
#[derive(Debug, Clone, Default)]
pub struct AnnotateStats {
    /// Number of files staged with metadata.
    pub files_annotated: usize,
    /// Files skipped because they could not be read, with the reason.
    pub files_skipped: Vec<(PathBuf, String)>,
}

impl AnnotateStats {
    /// Returns true if no files were skipped.
    pub fn is_success(&self) -> bool {
        self.files_skipped.is_empty()
    }
}

/// Stages every file under `input_root` verbatim with a metadata sibling.
///
/// Unreadable files are logged and skipped; staging-area write failures
/// abort the pass, matching the driver's failure asymmetry.
pub fn annotate_tree(
    config: &Config,
    input_root: &Path,
    stage_root: &Path,
) -> Result<AnnotateStats, StageError> {
    let mut stats = AnnotateStats::default();

    for entry in WalkDir::new(input_root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "unreadable directory entry, skipping");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();

        let rel_path = match path.strip_prefix(input_root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };

        let body = match fs::read(path) {
            Ok(body) => body,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "unreadable file, skipping");
                stats
                    .files_skipped
                    .push((rel_path, format!("unreadable: {err}")));
                continue;
            }
        };

        let rel_display = rel_path.display().to_string();
        let dest = stage_root.join(&rel_path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| StageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&dest, body).map_err(|source| StageError::WriteArtifact {
            path: dest.clone(),
            source,
        })?;

        let metadata = SectionMetadata::for_file(
            &format!("{}{rel_display}", config.annotate.base_url),
            &rel_display,
            &config.annotate.data_source,
        );
        let json = metadata.to_json().map_err(|source| StageError::Serialize {
            path: dest.clone(),
            source,
        })?;
        let metadata_path = stage_root.join(format!("{rel_display}.metadata.json"));
        fs::write(&metadata_path, json).map_err(|source| StageError::WriteArtifact {
            path: metadata_path.clone(),
            source,
        })?;

        debug!(file = %rel_display, "annotated");
        stats.files_annotated += 1;
    }

    info!(
        files = stats.files_annotated,
        skipped = stats.files_skipped.len(),
        "annotate finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tempfile::TempDir;

    use super::*;

    fn config() -> Config {
        let mut config = Config::default();
        config.annotate.base_url = "https://transcripts.example.com/".to_string();
        config
    }

    #[test]
    fn annotate_copies_file_and_writes_metadata() {
        let input = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();
        fs::create_dir_all(input.path().join("general")).unwrap();
        fs::write(input.path().join("general/2024-01.txt"), "hello team").unwrap();

        let stats = annotate_tree(&config(), input.path(), staged.path()).unwrap();

        assert_eq!(stats.files_annotated, 1);
        assert!(stats.is_success());
        assert_eq!(
            fs::read_to_string(staged.path().join("general/2024-01.txt")).unwrap(),
            "hello team"
        );

        let metadata: Value = serde_json::from_str(
            &fs::read_to_string(staged.path().join("general/2024-01.txt.metadata.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(
            metadata["Attributes"]["_source_uri"],
            "https://transcripts.example.com/general/2024-01.txt"
        );
        assert_eq!(metadata["Attributes"]["data_source"], "slack");
        assert_eq!(metadata["Title"], "general/2024-01.txt");
        assert_eq!(metadata["ContentType"], "PLAIN_TEXT");
    }

    #[test]
    fn annotate_never_splits_content() {
        let input = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();
        let body = "# looks like a heading\n## but stays one file";
        fs::write(input.path().join("log.txt"), body).unwrap();

        let stats = annotate_tree(&config(), input.path(), staged.path()).unwrap();

        assert_eq!(stats.files_annotated, 1);
        assert_eq!(
            fs::read_to_string(staged.path().join("log.txt")).unwrap(),
            body
        );
    }

    #[test]
    fn annotate_write_failure_aborts() {
        let input = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();
        fs::write(input.path().join("log.txt"), "hello").unwrap();
        // A directory squatting on the destination path makes the write fail.
        fs::create_dir_all(staged.path().join("log.txt")).unwrap();

        let err = annotate_tree(&config(), input.path(), staged.path()).unwrap_err();

        assert!(matches!(err, StageError::WriteArtifact { .. }));
        assert!(!staged.path().join("log.txt.metadata.json").exists());
    }

    #[test]
    fn annotate_empty_tree_is_success() {
        let input = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();

        let stats = annotate_tree(&config(), input.path(), staged.path()).unwrap();

        assert_eq!(stats.files_annotated, 0);
        assert!(stats.is_success());
    }
}
