use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Defaults shipped with the crate; validated by `build.rs`.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub page: PageConfig,
    pub font: FontConfig,
    pub lists: ListsConfig,
    pub meta: MetaConfig,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
    pub paper: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub family: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListsConfig {
    /// Lists with at most this many items are not split across pages.
    pub keep_together: usize,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self { keep_together: 5 }
    }
}

/// Which pieces of lesson metadata are shown above the document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetaConfig {
    pub show_title: bool,
    pub show_category: bool,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            show_title: true,
            show_category: true,
        }
    }
}

impl Config {
    /// The configuration compiled into the binary.
    pub fn compiled_default() -> Self {
        match toml::from_str(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("bundled default config is invalid, using built-in values: {e}");
                Self::default()
            }
        }
    }

    /// Load config from a TOML file, or return the compiled defaults if it
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::compiled_default());
        }
        Self::from_file(path)
    }

    /// Load config from a TOML file that must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config text. Keys it leaves out keep their compiled defaults.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let overlay: toml::Table = content.parse()?;
        let mut table = default_table().unwrap_or_default();
        merge(&mut table, overlay);
        toml::Value::Table(table).try_into()
    }
}

fn default_table() -> Option<toml::Table> {
    DEFAULT_CONFIG.parse().ok()
}

/// Recursively overlay `overlay` onto `base`; tables merge, values replace.
fn merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(overlay_table) => match base.get_mut(&key) {
                Some(toml::Value::Table(base_table)) => merge(base_table, overlay_table),
                _ => {
                    base.insert(key, toml::Value::Table(overlay_table));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_file_matches_the_schema() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::compiled_default());
        assert_ne!(parsed, Config::default());
    }

    #[test]
    fn compiled_default_reads_the_bundled_file() {
        let config = Config::compiled_default();
        assert_eq!(config.page.paper.as_deref(), Some("a4"));
        assert_eq!(config.font.size.as_deref(), Some("11pt"));
        assert_eq!(config.lists.keep_together, 5);
        assert!(config.meta.show_title);
        assert!(!config.page.numbers);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml("[page]\nnumbers = true\n\n[meta]\nshow_category = false\n")
            .unwrap();
        assert!(config.page.numbers);
        assert_eq!(config.page.paper.as_deref(), Some("a4"));
        assert!(config.meta.show_title);
        assert!(!config.meta.show_category);
    }

    #[test]
    fn empty_file_is_the_compiled_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::compiled_default());
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(Config::from_toml("[lists]\nkeep_together = \"many\"\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/definitely/not/here/lessondoc.toml")).unwrap();
        assert_eq!(config, Config::compiled_default());
    }

    #[test]
    fn from_file_requires_the_file() {
        let err = Config::from_file(Path::new("/definitely/not/here/lessondoc.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
