//! Configuration loading from the user config directory.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Startup configuration, read from `config.toml`. Command-line flags
/// take precedence over values from the file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum retained history entries. Unbounded when absent.
    pub history_limit: Option<usize>,
    /// Start in engineering mode.
    #[serde(default)]
    pub engineering: bool,
    /// Start with the dark theme.
    #[serde(default)]
    pub dark: bool,
}

impl Config {
    /// Load from the default location (`<config_dir>/engcalc/config.toml`).
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load() -> anyhow::Result<Self> {
        match default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("engcalc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            history_limit = 50
            engineering = true
            dark = true
            "#,
        )
        .unwrap();

        assert_eq!(config.history_limit, Some(50));
        assert!(config.engineering);
        assert!(config.dark);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history_limit, None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<Config>("theme = \"dark\"").is_err());
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/engcalc.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
