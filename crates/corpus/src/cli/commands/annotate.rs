//! Implementation of `corpus annotate`.

use std::{path::Path, process::ExitCode};

use corpus_stage::annotate_tree;

use crate::cli::commands::shared::load_config;

/// Stages plain-text files verbatim with metadata siblings.
pub fn run(config_path: Option<&Path>, input: &Path, output: &Path) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    match annotate_tree(&config, input, output) {
        Ok(stats) => {
            println!("annotated {} files", stats.files_annotated);
            if !stats.is_success() {
                println!("skipped {} files (see log)", stats.files_skipped.len());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
