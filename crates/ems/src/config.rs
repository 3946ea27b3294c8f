//! View presets.
//!
//! Each view has a preset naming the fields its search box looks in, the
//! date field its date range applies to, its default sort, page size and
//! select controls. Presets come from an embedded YAML file; a user file
//! is merged over it key by key, so it only has to name what it changes.
//!
//! The user file is `--config <file>`, or `$EMS_CONFIG` when the flag is
//! absent.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ems_filter::{Selection, SortSpec};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value as Yaml;
use thiserror::Error;
use tracing::{debug, info};

use crate::views::ViewKind;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "EMS_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../config/default.yaml");

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid preset for {view}: {reason}")]
    Invalid { view: ViewKind, reason: String },
}

/// Settings for every view.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub views: Views,
}

/// One preset per view.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Views {
    pub directory: ViewPreset,
    pub leave: ViewPreset,
    pub audit: ViewPreset,
}

/// Defaults of one list view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewPreset {
    /// Heading shown above the list.
    pub title: String,
    /// Fields the search box looks in.
    pub search_fields: Vec<String>,
    /// Field the date range applies to.
    pub date_field: String,
    /// Sort used when none is requested, as `field[:dir]`.
    #[serde(default, deserialize_with = "sort_from_str")]
    pub sort: Option<SortSpec>,
    /// Records per page.
    pub page_size: usize,
    /// Select controls and their initial selections.
    #[serde(default)]
    pub filters: BTreeMap<String, Selection>,
}

impl Config {
    /// The embedded configuration.
    pub fn embedded() -> Result<Self, ConfigError> {
        Config::from_yaml("")
    }

    /// Parses a user config and merges it over the embedded one.
    ///
    /// Empty input yields the embedded configuration.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let mut merged: Yaml = serde_yaml::from_str(DEFAULT_CONFIG)?;
        if !text.trim().is_empty() {
            let overrides: Yaml = serde_yaml::from_str(text)?;
            merge(&mut merged, overrides);
        }

        let config: Config = serde_yaml::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and merges the file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::from_yaml(&text)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads the config named by the flag or the environment, or the
    /// embedded one when neither is set.
    pub fn load(flag: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = env::var_os(CONFIG_ENV).map(PathBuf::from);
        match resolve_path(flag, from_env) {
            Some(path) => Config::from_file(&path),
            None => {
                debug!("using embedded config");
                Config::embedded()
            }
        }
    }

    /// Returns the preset of a view.
    pub fn preset(&self, view: ViewKind) -> &ViewPreset {
        match view {
            ViewKind::Directory => &self.views.directory,
            ViewKind::Leave => &self.views.leave,
            ViewKind::Audit => &self.views.audit,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for view in ViewKind::ALL {
            let preset = self.preset(view);
            let invalid = |reason: &str| ConfigError::Invalid {
                view,
                reason: reason.to_string(),
            };

            if preset.page_size == 0 {
                return Err(invalid("page_size must be at least 1"));
            }
            if preset.date_field.trim().is_empty() {
                return Err(invalid("date_field is empty"));
            }
            if preset.search_fields.iter().any(|f| f.trim().is_empty()) {
                return Err(invalid("search_fields contains an empty name"));
            }
        }
        Ok(())
    }
}

/// Picks the config file: the flag wins over the environment, and an
/// empty environment value counts as unset.
pub fn resolve_path(flag: Option<&Path>, from_env: Option<PathBuf>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| from_env.filter(|p| !p.as_os_str().is_empty()))
}

/// Merges `overrides` into `base`. Mappings merge key by key; anything
/// else in `overrides` replaces the base value.
fn merge(base: &mut Yaml, overrides: Yaml) {
    match (base, overrides) {
        (Yaml::Mapping(base), Yaml::Mapping(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

fn sort_from_str<'de, D>(deserializer: D) -> Result<Option<SortSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let text: Option<String> = Option::deserialize(deserializer)?;
    match text.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
