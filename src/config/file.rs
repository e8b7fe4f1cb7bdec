//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/vessel/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! # Default directory to inspect when no argument is given
//! dir = "~/Projects/my-app"
//!
//! [build]
//! output = "./vessel-output"
//! node_version = "16-alpine"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Default directory to inspect (defaults to the current directory when not set)
    pub dir: Option<PathBuf>,

    /// Production build options
    #[serde(default)]
    pub build: FileBuildConfig,
}

/// Production build options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileBuildConfig {
    /// Output directory for generated production build files
    pub output: Option<PathBuf>,

    /// Node version tag for the production build stage
    pub node_version: Option<String>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/vessel/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux/macOS, `%APPDATA%` on Windows).
    ///
    /// # Returns
    ///
    /// `Some(PathBuf)` with the config file path, or `None` if the config
    /// directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vessel").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    /// If the file exists but is malformed, returns an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file exists but cannot be read
    /// - The config file exists but contains invalid TOML or unexpected fields
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.dir.is_none());
        assert!(config.build.output.is_none());
        assert!(config.build.node_version.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
dir = "~/Projects/my-app"

[build]
output = "./out"
node_version = "20-alpine"
"#;
        let config: FileConfig = toml::from_str(toml_content).expect("should parse");

        assert_eq!(config.dir, Some(PathBuf::from("~/Projects/my-app")));
        assert_eq!(config.build.output, Some(PathBuf::from("./out")));
        assert_eq!(config.build.node_version, Some("20-alpine".to_string()));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: FileConfig = toml::from_str("dir = \"/tmp/app\"\n").expect("should parse");

        assert_eq!(config.dir, Some(PathBuf::from("/tmp/app")));
        assert!(config.build.output.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").expect("should parse");
        assert!(config.dir.is_none());
    }

    #[test]
    fn test_expand_tilde_absolute_path_unchanged() {
        let absolute = PathBuf::from("/absolute/path");
        assert_eq!(expand_tilde(&absolute), PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_expand_tilde_home_prefix() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_tilde(&PathBuf::from("~/Projects"));
            assert_eq!(expanded, home.join("Projects"));
        }
    }

    #[test]
    fn test_config_path_ends_with_expected_components() {
        if let Some(path) = FileConfig::config_path() {
            assert!(path.ends_with("vessel/config.toml"));
        }
    }
}
