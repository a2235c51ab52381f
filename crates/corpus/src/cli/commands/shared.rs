//! Helpers shared across subcommands.

use std::{env, path::Path, process::ExitCode};

use corpus_config::Config;

/// Loads configuration from an explicit path or the working directory.
///
/// Prints the error and returns `FAILURE` when a config file exists but
/// cannot be loaded.
pub fn load_config(config_path: Option<&Path>) -> Result<Config, ExitCode> {
    let result = match config_path {
        Some(path) => Config::load_file(path),
        None => {
            let cwd = env::current_dir().map_err(|err| {
                eprintln!("error: could not determine current directory: {err}");
                ExitCode::FAILURE
            })?;
            Config::load(&cwd)
        }
    };

    result.map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::FAILURE
    })
}
