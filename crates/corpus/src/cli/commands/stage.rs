//! Implementation of `corpus stage`.

use std::{path::Path, process::ExitCode};

use corpus_stage::Pipeline;

use crate::cli::commands::shared::load_config;

/// Splits a converted tree into staged sections with metadata.
pub fn run(config_path: Option<&Path>, input: &Path, output: &Path) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    match Pipeline::new(&config).stage(input, output) {
        Ok(stats) => {
            println!(
                "staged {} sections from {} documents",
                stats.sections_written, stats.documents_processed
            );
            if !stats.is_success() {
                println!("skipped {} documents (see log)", stats.documents_skipped.len());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
