//! Configuration loading and validation.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    paths,
    rules::Rules,
};

/// Parsed configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File the configuration was read from, if any.
    path: Option<PathBuf>,
    /// Validation rules after applying overrides.
    rules: Rules,
}

/// Raw config file structure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    /// Frontmatter keys accepted in addition to the defaults.
    #[serde(default)]
    extra_fields: Vec<String>,
    /// Replacement set of resource directory names.
    resource_dirs: Option<Vec<String>>,
}

impl Config {
    /// Load an explicit config file, or the default one when it exists.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match paths::default_config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => {
                debug!("no config file, using default rules");
                Ok(Self::default())
            }
        }
    }

    /// Load a config file from an explicit path.
    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|error| Error::ConfigRead {
            path: path.to_path_buf(),
            source: error,
        })?;

        let raw: RawConfig = toml::from_str(&contents).map_err(|error| Error::ConfigParse {
            path: path.to_path_buf(),
            source: error,
        })?;

        let invalid = |message: String| Error::InvalidConfig {
            path: path.to_path_buf(),
            message,
        };

        if let Some(field) = raw.extra_fields.iter().find(|f| f.trim().is_empty()) {
            return Err(invalid(format!("empty frontmatter field name {field:?}")));
        }

        let mut rules = Rules::default().with_extra_fields(raw.extra_fields);
        if let Some(dirs) = raw.resource_dirs {
            if let Some(dir) = dirs.iter().find(|dir| !is_plain_dir_name(dir)) {
                return Err(invalid(format!(
                    "resource directory {dir:?} must be a single directory name"
                )));
            }
            rules = rules.with_resource_dirs(dirs);
        }

        debug!(path = %paths::display_path(path), "loaded config");
        Ok(Self {
            path: Some(path.to_path_buf()),
            rules,
        })
    }

    /// Return the path the config was read from.
    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Return the validation rules.
    pub(crate) fn rules(&self) -> &Rules {
        &self.rules
    }
}

/// Whether a name is exactly one normal path component.
fn is_plain_dir_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}
