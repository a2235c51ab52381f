//! Deployment configuration for the corpus staging pipeline.
//!
//! Configuration lives in a single TOML file named `corpus.toml`. Every
//! field is optional; absent fields fall back to the defaults baked into
//! [`Config`]. The base URLs are per-deployment constants that end up in
//! every `_source_uri` the pipeline emits, so they are the one thing a
//! deployment must set.

#![warn(missing_docs)]

mod error;
mod parse;

use std::path::Path;

pub use error::ConfigError;
pub use parse::{
    RawAnnotateSettings, RawConfig, RawConvertSettings, RawSiteSettings, RawStageSettings,
    parse_config_file, parse_config_str,
};

/// Name of the configuration file the CLI looks for.
pub const CONFIG_FILENAME: &str = "corpus.toml";

/// Fully resolved configuration with all defaults applied.
#[derive(Debug, Clone)]
pub struct Config {
    /// Site settings.
    pub site: SiteSettings,
    /// Format-conversion settings.
    pub convert: ConvertSettings,
    /// Documentation staging settings.
    pub stage: StageSettings,
    /// Plain-text annotate settings.
    pub annotate: AnnotateSettings,
}

/// Settings describing the published documentation site.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Base URL prepended to every documentation `_source_uri`.
    pub base_url: String,
}

/// Settings for the markup conversion pass.
#[derive(Debug, Clone)]
pub struct ConvertSettings {
    /// File extension of structured-markup inputs.
    pub from_ext: String,
    /// Source format name passed to the external converter.
    pub from_format: String,
    /// File extension given to converted outputs.
    pub to_ext: String,
    /// Destination format name passed to the external converter.
    pub to_format: String,
}

/// Settings for the documentation staging pass.
#[derive(Debug, Clone)]
pub struct StageSettings {
    /// `data_source` attribute written into section metadata.
    pub data_source: String,
    /// Extension substituted for the document extension in `_source_uri`.
    pub html_ext: String,
}

/// Settings for the plain-text annotate pass.
#[derive(Debug, Clone)]
pub struct AnnotateSettings {
    /// Base URL prepended to annotated-file `_source_uri`s.
    pub base_url: String,
    /// `data_source` attribute written into annotate metadata.
    pub data_source: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteSettings {
                base_url: String::new(),
            },
            convert: ConvertSettings {
                from_ext: "rst".to_string(),
                from_format: "rst".to_string(),
                to_ext: "md".to_string(),
                to_format: "markdown".to_string(),
            },
            stage: StageSettings {
                data_source: "documentation".to_string(),
                html_ext: "html".to_string(),
            },
            annotate: AnnotateSettings {
                base_url: String::new(),
                data_source: "slack".to_string(),
            },
        }
    }
}

impl Config {
    /// Loads configuration from `corpus.toml` in the given directory.
    ///
    /// Returns `Ok(Config::default())` when no file exists there.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Loads configuration from a specific file path.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = parse_config_file(path)?;
        Ok(raw.into_config())
    }
}
