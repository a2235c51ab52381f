//! Configuration file parsing.
//!
//! Parses `corpus.toml` into an intermediate [`RawConfig`] that preserves
//! the optional nature of every field, then folds it over the defaults.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Config, ConfigError};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional; missing sections and keys fall back to the
/// defaults in [`Config::default`]. This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// Site settings section.
    pub site: Option<RawSiteSettings>,
    /// Conversion settings section.
    pub convert: Option<RawConvertSettings>,
    /// Staging settings section.
    pub stage: Option<RawStageSettings>,
    /// Annotate settings section.
    pub annotate: Option<RawAnnotateSettings>,
}

/// Raw site settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSiteSettings {
    /// Base URL prepended to every documentation `_source_uri`.
    pub base_url: Option<String>,
}

/// Raw conversion settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConvertSettings {
    /// Extension of structured-markup inputs.
    pub from_ext: Option<String>,
    /// Source format passed to the external converter.
    pub from_format: Option<String>,
    /// Extension given to converted outputs.
    pub to_ext: Option<String>,
    /// Destination format passed to the external converter.
    pub to_format: Option<String>,
}

/// Raw staging settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStageSettings {
    /// `data_source` attribute for section metadata.
    pub data_source: Option<String>,
    /// Extension substituted into `_source_uri`.
    pub html_ext: Option<String>,
}

/// Raw annotate settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAnnotateSettings {
    /// Base URL for annotated-file `_source_uri`s.
    pub base_url: Option<String>,
    /// `data_source` attribute for annotate metadata.
    pub data_source: Option<String>,
}

impl RawConfig {
    /// Folds this raw config over the defaults.
    pub fn into_config(self) -> Config {
        let mut config = Config::default();

        if let Some(site) = self.site {
            if let Some(base_url) = site.base_url {
                config.site.base_url = base_url;
            }
        }
        if let Some(convert) = self.convert {
            if let Some(from_ext) = convert.from_ext {
                config.convert.from_ext = from_ext;
            }
            if let Some(from_format) = convert.from_format {
                config.convert.from_format = from_format;
            }
            if let Some(to_ext) = convert.to_ext {
                config.convert.to_ext = to_ext;
            }
            if let Some(to_format) = convert.to_format {
                config.convert.to_format = to_format;
            }
        }
        if let Some(stage) = self.stage {
            if let Some(data_source) = stage.data_source {
                config.stage.data_source = data_source;
            }
            if let Some(html_ext) = stage.html_ext {
                config.stage.html_ext = html_ext;
            }
        }
        if let Some(annotate) = self.annotate {
            if let Some(base_url) = annotate.base_url {
                config.annotate.base_url = base_url;
            }
            if let Some(data_source) = annotate.data_source {
                config.annotate.data_source = data_source;
            }
        }

        config
    }
}

/// Parses a configuration string into a [`RawConfig`].
///
/// The `path` is only used for error reporting.
pub fn parse_config_str(content: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a configuration file.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_str(&content, path)
}
