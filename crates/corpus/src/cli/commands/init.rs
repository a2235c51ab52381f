//! Implementation of `corpus init`.

use std::{env, fs, process::ExitCode};

use corpus_config::CONFIG_FILENAME;

/// Default configuration template with commented examples.
const CONFIG_TEMPLATE: &str = include_str!("../../templates/config.toml");

/// Writes a starter `corpus.toml` into the current directory.
pub fn run(force: bool) -> ExitCode {
    let cwd = match env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("error: could not determine current directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    let config_path = cwd.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    if let Err(err) = fs::write(&config_path, CONFIG_TEMPLATE) {
        eprintln!("error: failed to write {}: {err}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("created {}", config_path.display());
    ExitCode::SUCCESS
}
