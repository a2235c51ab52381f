//! Structured-markup to markdown tree conversion.
//!
//! Walks a tree of structured-markup documents (reStructuredText by
//! default) and mirrors it under an output root with every file translated
//! to markdown. The translation itself is delegated to an external
//! capability behind the [`DocumentConverter`] trait; the production
//! implementation shells out to pandoc.
//!
//! A file that fails to convert is logged and skipped; the batch always
//! runs to completion and reports how many files actually converted.

#![warn(missing_docs)]

mod error;
mod pandoc;

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::WalkDir;

pub use error::ConvertError;
pub use pandoc::PandocConverter;

/// External format-translation capability.
///
/// Implementations read `source` and return its body translated from the
/// `from` format to the `to` format. Failure is per-file and the caller
/// treats it as non-fatal.
pub trait DocumentConverter {
    /// Converts one file, returning the translated text.
    fn convert(&self, source: &Path, from: &str, to: &str) -> Result<String, ConvertError>;
}

/// Statistics from one tree conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertStats {
    /// Number of files successfully converted and written.
    pub files_converted: usize,
    /// Files skipped due to conversion or write failures, with the reason.
    pub files_skipped: Vec<(PathBuf, String)>,
}

impl ConvertStats {
    /// Returns true if every discovered file converted.
    pub fn is_success(&self) -> bool {
        self.files_skipped.is_empty()
    }
}

/// Conversion formats and extensions for one tree pass.
#[derive(Debug, Clone)]
pub struct ConvertRules {
    /// Extension of input files to convert (without the dot).
    pub from_ext: String,
    /// Source format name passed to the converter.
    pub from_format: String,
    /// Extension given to output files (without the dot).
    pub to_ext: String,
    /// Destination format name passed to the converter.
    pub to_format: String,
}

/// Converts every matching file under `input_root` into `output_root`.
///
/// The output tree mirrors the input's relative directory structure with
/// extensions renamed per `rules`. Parent directories are created as
/// needed; directory creation failure is fatal, per-file conversion or
/// write failure is logged and skipped. Files without the `from_ext`
/// extension are ignored.
pub fn convert_tree(
    converter: &dyn DocumentConverter,
    input_root: &Path,
    output_root: &Path,
    rules: &ConvertRules,
) -> Result<ConvertStats, ConvertError> {
    let mut stats = ConvertStats::default();

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

        let source = entry.path();
        if source.extension().and_then(|ext| ext.to_str()) != Some(rules.from_ext.as_str()) {
            continue;
        }

        // The input root prefix always strips for paths walkdir yielded
        // from it.
        let rel_path = match source.strip_prefix(input_root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let dest = output_root.join(rel_path).with_extension(&rules.to_ext);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| ConvertError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        match convert_one(converter, source, &dest, rules) {
            Ok(()) => {
                debug!(source = %source.display(), dest = %dest.display(), "converted");
                stats.files_converted += 1;
            }
            Err(err) => {
                warn!(source = %source.display(), error = %err, "conversion failed, skipping");
                stats.files_skipped.push((source.to_path_buf(), err.to_string()));
            }
        }
    }

    debug!(
        converted = stats.files_converted,
        skipped = stats.files_skipped.len(),
        "tree conversion finished"
    );
    Ok(stats)
}

/// Converts a single file and writes the result.
fn convert_one(
    converter: &dyn DocumentConverter,
    source: &Path,
    dest: &Path,
    rules: &ConvertRules,
) -> Result<(), ConvertError> {
    let body = converter.convert(source, &rules.from_format, &rules.to_format)?;
    fs::write(dest, body).map_err(|source_err| ConvertError::WriteOutput {
        path: dest.to_path_buf(),
        source: source_err,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    /// Converter double that uppercases file contents, failing on files
    /// whose name contains "bad".
    struct FakeConverter;

    impl DocumentConverter for FakeConverter {
        fn convert(&self, source: &Path, _from: &str, _to: &str) -> Result<String, ConvertError> {
            if source.to_string_lossy().contains("bad") {
                return Err(ConvertError::Failed {
                    path: source.to_path_buf(),
                    detail: "synthetic failure".to_string(),
                });
            }
            let body = fs::read_to_string(source).map_err(|err| ConvertError::Failed {
                path: source.to_path_buf(),
                detail: err.to_string(),
            })?;
            Ok(body.to_uppercase())
        }
    }

    fn rules() -> ConvertRules {
        ConvertRules {
            from_ext: "rst".to_string(),
            from_format: "rst".to_string(),
            to_ext: "md".to_string(),
            to_format: "markdown".to_string(),
        }
    }

    #[test]
    fn converts_tree_preserving_relative_paths() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::create_dir_all(input.path().join("guides/advanced")).unwrap();
        fs::write(input.path().join("index.rst"), "hello").unwrap();
        fs::write(input.path().join("guides/advanced/tuning.rst"), "deep").unwrap();

        let stats = convert_tree(&FakeConverter, input.path(), output.path(), &rules()).unwrap();

        assert_eq!(stats.files_converted, 2);
        assert!(stats.is_success());
        assert_eq!(
            fs::read_to_string(output.path().join("index.md")).unwrap(),
            "HELLO"
        );
        assert_eq!(
            fs::read_to_string(output.path().join("guides/advanced/tuning.md")).unwrap(),
            "DEEP"
        );
    }

    #[test]
    fn failed_file_is_skipped_batch_continues() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("good.rst"), "fine").unwrap();
        fs::write(input.path().join("bad.rst"), "broken").unwrap();

        let stats = convert_tree(&FakeConverter, input.path(), output.path(), &rules()).unwrap();

        assert_eq!(stats.files_converted, 1);
        assert_eq!(stats.files_skipped.len(), 1);
        assert!(!stats.is_success());
        assert!(output.path().join("good.md").exists());
        assert!(!output.path().join("bad.md").exists());
    }

    #[test]
    fn ignores_files_with_other_extensions() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("notes.txt"), "plain").unwrap();
        fs::write(input.path().join("doc.rst"), "markup").unwrap();

        let stats = convert_tree(&FakeConverter, input.path(), output.path(), &rules()).unwrap();

        assert_eq!(stats.files_converted, 1);
        assert!(!output.path().join("notes.md").exists());
        assert!(!output.path().join("notes.txt").exists());
    }

    #[test]
    fn empty_input_tree_converts_nothing() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let stats = convert_tree(&FakeConverter, input.path(), output.path(), &rules()).unwrap();

        assert_eq!(stats.files_converted, 0);
        assert!(stats.is_success());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subtree_does_not_abort_walk() {
        use std::os::unix::fs::PermissionsExt;

        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("doc.rst"), "ok").unwrap();
        let locked = input.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let stats = convert_tree(&FakeConverter, input.path(), output.path(), &rules());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(stats.unwrap().files_converted, 1);
        assert!(output.path().join("doc.md").exists());
    }

    #[test]
    fn skip_reason_names_the_file() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("bad.rst"), "x").unwrap();

        let stats = convert_tree(&FakeConverter, input.path(), output.path(), &rules()).unwrap();

        let (path, reason) = &stats.files_skipped[0];
        assert_eq!(path, &input.path().join("bad.rst"));
        assert!(reason.contains("synthetic failure"));
    }
}
