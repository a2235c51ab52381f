//! The pipeline driver.
//!
//! Walks a converted document tree and, for every document, splits it into
//! sections and writes one content artifact plus one metadata artifact per
//! section into the staging area. Content artifacts land at
//! `<relative_path>#<url_slug>.txt` with the metadata sibling at that path
//! plus `.metadata.json`, the naming the external indexer consumes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use corpus_config::Config;
use corpus_convert::{ConvertRules, ConvertStats, DocumentConverter, convert_tree};
use corpus_document::{Section, parse_sections};

use crate::{SectionMetadata, StageError};

/// Statistics from one staging pass.
#[derive(Debug, Clone, Default)]
pub struct StageStats {
    /// Number of documents fully staged.
    pub documents_processed: usize,
    /// Total sections written across all documents.
    pub sections_written: usize,
    /// Documents skipped (unreadable or yielding no sections), with the
    /// reason.
    pub documents_skipped: Vec<(PathBuf, String)>,
}

impl StageStats {
    /// Returns true if no documents were skipped.
    pub fn is_success(&self) -> bool {
        self.documents_skipped.is_empty()
    }
}

/// Statistics from an end-to-end convert-then-stage run.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Conversion-pass statistics.
    pub convert: ConvertStats,
    /// Staging-pass statistics.
    pub stage: StageStats,
}

/// Orchestrates the staging pipeline for one deployment configuration.
pub struct Pipeline<'a> {
    /// The deployment configuration.
    config: &'a Config,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline over the given configuration.
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Stages every converted document under `converted_root`.
    ///
    /// Documents are processed independently: an unreadable document or
    /// one yielding no sections is logged and skipped. A failure to write
    /// into the staging area aborts the whole batch.
    pub fn stage(
        &self,
        converted_root: &Path,
        stage_root: &Path,
    ) -> Result<StageStats, StageError> {
        let mut stats = StageStats::default();

        for entry in WalkDir::new(converted_root).follow_links(false) {
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
            if path.extension().and_then(|ext| ext.to_str())
                != Some(self.config.convert.to_ext.as_str())
            {
                continue;
            }

            // Relative path computed once; all artifact and provenance
            // paths derive from it.
            let rel_path = match path.strip_prefix(converted_root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => continue,
            };

            let body = match fs::read_to_string(path) {
                Ok(body) => body,
                Err(err) => {
                    warn!(document = %path.display(), error = %err, "unreadable document, skipping");
                    stats
                        .documents_skipped
                        .push((rel_path, format!("unreadable: {err}")));
                    continue;
                }
            };

            let sections = parse_sections(&body);
            if sections.is_empty() {
                warn!(document = %path.display(), "document produced no sections, skipping");
                stats
                    .documents_skipped
                    .push((rel_path, "no sections".to_string()));
                continue;
            }

            let written = self.write_document(&rel_path, &sections, stage_root)?;
            debug!(document = %rel_path.display(), sections = written, "staged document");
            stats.sections_written += written;
            stats.documents_processed += 1;
        }

        info!(
            documents = stats.documents_processed,
            sections = stats.sections_written,
            skipped = stats.documents_skipped.len(),
            "staging finished"
        );
        Ok(stats)
    }

    /// Runs the full convert-then-stage flow for one source tree.
    ///
    /// Structured markup under `source_root` is converted into
    /// `scratch_root`, then staged into `stage_root`.
    pub fn run(
        &self,
        converter: &dyn DocumentConverter,
        source_root: &Path,
        scratch_root: &Path,
        stage_root: &Path,
    ) -> Result<RunStats, StageError> {
        let convert = &self.config.convert;
        let rules = ConvertRules {
            from_ext: convert.from_ext.clone(),
            from_format: convert.from_format.clone(),
            to_ext: convert.to_ext.clone(),
            to_format: convert.to_format.clone(),
        };

        let convert_stats = convert_tree(converter, source_root, scratch_root, &rules)?;
        let stage_stats = self.stage(scratch_root, stage_root)?;

        Ok(RunStats {
            convert: convert_stats,
            stage: stage_stats,
        })
    }

    /// Writes the content and metadata artifacts for one document.
    fn write_document(
        &self,
        rel_path: &Path,
        sections: &[Section],
        stage_root: &Path,
    ) -> Result<usize, StageError> {
        let html_path = rel_path
            .with_extension(&self.config.stage.html_ext)
            .display()
            .to_string();

        for section in sections {
            let artifact_name = format!("{}#{}.txt", rel_path.display(), section.slug);
            let content_path = stage_root.join(&artifact_name);

            if let Some(parent) = content_path.parent() {
                fs::create_dir_all(parent).map_err(|source| StageError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            fs::write(&content_path, &section.body).map_err(|source| {
                StageError::WriteArtifact {
                    path: content_path.clone(),
                    source,
                }
            })?;

            let metadata = SectionMetadata::for_section(
                &self.config.site.base_url,
                &html_path,
                &section.slug,
                &section.title,
                &self.config.stage.data_source,
            );
            let json = metadata.to_json().map_err(|source| StageError::Serialize {
                path: content_path.clone(),
                source,
            })?;

            let metadata_path = stage_root.join(format!("{artifact_name}.metadata.json"));
            fs::write(&metadata_path, json).map_err(|source| StageError::WriteArtifact {
                path: metadata_path.clone(),
                source,
            })?;
        }

        Ok(sections.len())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tempfile::TempDir;

    use corpus_convert::ConvertError;

    use super::*;

    /// Converter double that passes markdown bodies through unchanged.
    struct PassthroughConverter;

    impl DocumentConverter for PassthroughConverter {
        fn convert(&self, source: &Path, _from: &str, _to: &str) -> Result<String, ConvertError> {
            fs::read_to_string(source).map_err(|err| ConvertError::Failed {
                path: source.to_path_buf(),
                detail: err.to_string(),
            })
        }
    }

    fn config_with_base_url(base_url: &str) -> Config {
        let mut config = Config::default();
        config.site.base_url = base_url.to_string();
        config
    }

    #[test]
    fn stage_writes_content_and_metadata_pair_per_section() {
        let converted = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();
        fs::create_dir_all(converted.path().join("a")).unwrap();
        fs::write(
            converted.path().join("a/b.md"),
            "## First Part\n\nbody one\n\n## Second Part\n\nbody two",
        )
        .unwrap();

        let config = config_with_base_url("https://docs.example.com/en/latest/");
        let stats = Pipeline::new(&config)
            .stage(converted.path(), staged.path())
            .unwrap();

        assert_eq!(stats.documents_processed, 1);
        assert_eq!(stats.sections_written, 2);
        assert!(stats.is_success());

        let first = staged.path().join("a/b.md#first-part.txt");
        let second = staged.path().join("a/b.md#second-part.txt");
        assert!(first.exists());
        assert!(second.exists());
        assert_eq!(
            fs::read_to_string(&first).unwrap(),
            "## First Part\n\nbody one\n"
        );

        let metadata: Value = serde_json::from_str(
            &fs::read_to_string(staged.path().join("a/b.md#first-part.txt.metadata.json"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(
            metadata["Attributes"]["_source_uri"],
            "https://docs.example.com/en/latest/a/b.html#first-part"
        );
        assert_eq!(metadata["Attributes"]["data_source"], "documentation");
        assert_eq!(metadata["Title"], "First Part");
        assert_eq!(metadata["ContentType"], "MD");
    }

    #[test]
    fn stage_skips_empty_document_and_continues() {
        let converted = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();
        fs::write(converted.path().join("empty.md"), "").unwrap();
        fs::write(converted.path().join("real.md"), "# Title\n\nbody").unwrap();

        let config = Config::default();
        let stats = Pipeline::new(&config)
            .stage(converted.path(), staged.path())
            .unwrap();

        assert_eq!(stats.documents_processed, 1);
        assert_eq!(stats.documents_skipped.len(), 1);
        assert_eq!(stats.documents_skipped[0].0, PathBuf::from("empty.md"));
        assert!(staged.path().join("real.md#title.txt").exists());
    }

    #[test]
    fn stage_write_failure_aborts_batch() {
        let converted = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();
        fs::write(converted.path().join("doc.md"), "# Title\n\nbody").unwrap();
        // A directory squatting on the artifact path makes the write fail.
        fs::create_dir_all(staged.path().join("doc.md#title.txt")).unwrap();

        let config = Config::default();
        let err = Pipeline::new(&config)
            .stage(converted.path(), staged.path())
            .unwrap_err();

        assert!(matches!(err, StageError::WriteArtifact { .. }));
        assert!(!staged.path().join("doc.md#title.txt.metadata.json").exists());
    }

    #[test]
    fn stage_ignores_non_markdown_files() {
        let converted = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();
        fs::write(converted.path().join("notes.rst"), "# Not converted").unwrap();

        let config = Config::default();
        let stats = Pipeline::new(&config)
            .stage(converted.path(), staged.path())
            .unwrap();

        assert_eq!(stats.documents_processed, 0);
    }

    #[test]
    fn stage_headingless_leading_chunk_gets_prose_slug() {
        let converted = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();
        fs::write(
            converted.path().join("doc.md"),
            "Intro prose here\n\n# Real Section\n\nbody",
        )
        .unwrap();

        let config = Config::default();
        let stats = Pipeline::new(&config)
            .stage(converted.path(), staged.path())
            .unwrap();

        // The bare-prose fallback keeps whatever slug the first line makes.
        assert_eq!(stats.sections_written, 2);
        assert!(staged.path().join("doc.md#intro-prose-here.txt").exists());
        assert!(staged.path().join("doc.md#real-section.txt").exists());
    }

    #[test]
    fn run_converts_then_stages_end_to_end() {
        let source = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();
        fs::create_dir_all(source.path().join("a")).unwrap();
        fs::write(
            source.path().join("a/b.rst"),
            "## Alpha\n\none\n\n## Beta\n\ntwo",
        )
        .unwrap();

        let config = config_with_base_url("https://docs.example.com/en/latest/");
        let stats = Pipeline::new(&config)
            .run(
                &PassthroughConverter,
                source.path(),
                scratch.path(),
                staged.path(),
            )
            .unwrap();

        assert_eq!(stats.convert.files_converted, 1);
        assert_eq!(stats.stage.sections_written, 2);

        for slug in ["alpha", "beta"] {
            let content = staged.path().join(format!("a/b.md#{slug}.txt"));
            let metadata_path = staged.path().join(format!("a/b.md#{slug}.txt.metadata.json"));
            assert!(content.exists(), "missing {}", content.display());
            assert!(metadata_path.exists());

            let metadata: Value =
                serde_json::from_str(&fs::read_to_string(&metadata_path).unwrap()).unwrap();
            let uri = metadata["Attributes"]["_source_uri"].as_str().unwrap();
            assert!(uri.ends_with(&format!("a/b.html#{slug}")), "bad uri {uri}");
        }
    }

    #[test]
    fn run_isolates_conversion_failures() {
        /// Fails on files whose name contains "bad".
        struct Picky;
        impl DocumentConverter for Picky {
            fn convert(
                &self,
                source: &Path,
                _from: &str,
                _to: &str,
            ) -> Result<String, ConvertError> {
                if source.to_string_lossy().contains("bad") {
                    return Err(ConvertError::Failed {
                        path: source.to_path_buf(),
                        detail: "unparseable".to_string(),
                    });
                }
                fs::read_to_string(source).map_err(|err| ConvertError::Failed {
                    path: source.to_path_buf(),
                    detail: err.to_string(),
                })
            }
        }

        let source = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let staged = TempDir::new().unwrap();
        fs::write(source.path().join("good.rst"), "# Fine\n\nbody").unwrap();
        fs::write(source.path().join("bad.rst"), "x").unwrap();

        let config = Config::default();
        let stats = Pipeline::new(&config)
            .run(&Picky, source.path(), scratch.path(), staged.path())
            .unwrap();

        assert_eq!(stats.convert.files_converted, 1);
        assert_eq!(stats.convert.files_skipped.len(), 1);
        assert!(staged.path().join("good.md#fine.txt").exists());
        assert!(!staged.path().join("bad.md#.txt").exists());
    }
}
