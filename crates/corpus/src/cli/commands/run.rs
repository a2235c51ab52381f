//! Implementation of `corpus run`.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use tempfile::TempDir;

use corpus_convert::PandocConverter;
use corpus_stage::Pipeline;

use crate::cli::commands::shared::load_config;

/// Converts and stages a tree end to end.
///
/// The converted intermediate lands in `scratch` when given, otherwise in
/// a temporary directory removed when the run finishes. The staging pass
/// stages everything under the scratch root, so an explicit scratch
/// directory must be empty; otherwise leftovers from an earlier run would
/// be staged as if they came from the current input tree.
pub fn run(
    config_path: Option<&Path>,
    input: &Path,
    output: &Path,
    scratch: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let (scratch, _scratch_guard) = match scratch {
        Some(path) => {
            if let Err(err) = ensure_empty_dir(&path) {
                eprintln!("error: scratch directory {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
            (path, None)
        }
        None => match TempDir::new() {
            Ok(dir) => (dir.path().to_path_buf(), Some(dir)),
            Err(err) => {
                eprintln!("error: failed to create scratch directory: {err}");
                return ExitCode::FAILURE;
            }
        },
    };

    match Pipeline::new(&config).run(&PandocConverter::new(), input, &scratch, output) {
        Ok(stats) => {
            println!(
                "converted {} files, staged {} sections from {} documents",
                stats.convert.files_converted,
                stats.stage.sections_written,
                stats.stage.documents_processed
            );
            let skipped = stats.convert.files_skipped.len() + stats.stage.documents_skipped.len();
            if skipped > 0 {
                println!("skipped {skipped} inputs (see log)");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Creates `path` if needed and verifies it contains nothing.
fn ensure_empty_dir(path: &Path) -> Result<(), io::Error> {
    fs::create_dir_all(path)?;
    if fs::read_dir(path)?.next().is_some() {
        return Err(io::Error::other("not empty"));
    }
    Ok(())
}
