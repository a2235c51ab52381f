//! Implementation of `corpus convert`.

use std::{path::Path, process::ExitCode};

use corpus_convert::{ConvertRules, PandocConverter, convert_tree};

use crate::cli::commands::shared::load_config;

/// Converts a structured-markup tree into a markdown tree.
pub fn run(config_path: Option<&Path>, input: &Path, output: &Path) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let rules = ConvertRules {
        from_ext: config.convert.from_ext.clone(),
        from_format: config.convert.from_format.clone(),
        to_ext: config.convert.to_ext.clone(),
        to_format: config.convert.to_format.clone(),
    };

    match convert_tree(&PandocConverter::new(), input, output, &rules) {
        Ok(stats) => {
            println!("converted {} files", stats.files_converted);
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
