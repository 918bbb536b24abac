//! Codec configuration, persisted as TOML.
//!
//! Every field has a serde default, so a partial (or empty) file is valid.

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving a configuration file.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read codec config: {path}")]
    #[diagnostic(
        code(reldata::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse codec config: {path}: {message}")]
    #[diagnostic(
        code(reldata::config::parse),
        help("Check the TOML syntax and the option names in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write codec config: {path}")]
    #[diagnostic(
        code(reldata::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Options controlling how datasets are read and written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Fail when a `.pred` data file is missing. When `false`, missing
    /// prediction files are read as empty layers.
    #[serde(default = "default_true")]
    pub require_prediction_files: bool,
    /// Stage all files next to their targets and rename them into place only
    /// after every file was written.
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
    /// `fsync` staged files before renaming them.
    #[serde(default = "default_true")]
    pub sync_on_write: bool,
    /// Create the target directory on write if it does not exist.
    #[serde(default)]
    pub create_dirs: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            require_prediction_files: default_true(),
            atomic_writes: default_true(),
            sync_on_write: default_true(),
            create_dirs: false,
        }
    }
}

impl CodecConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Save to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_and_durable() {
        let cfg = CodecConfig::default();
        assert!(cfg.require_prediction_files);
        assert!(cfg.atomic_writes);
        assert!(cfg.sync_on_write);
        assert!(!cfg.create_dirs);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(CodecConfig::from_toml("").unwrap(), CodecConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_fields() {
        let cfg = CodecConfig::from_toml("require_prediction_files = false\n").unwrap();
        assert!(!cfg.require_prediction_files);
        assert!(cfg.atomic_writes);
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(CodecConfig::from_toml("atomic = true\n").is_err());
    }

    #[test]
    fn config_roundtrip_toml() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("reldata.toml");

        let cfg = CodecConfig {
            sync_on_write: false,
            create_dirs: true,
            ..Default::default()
        };
        cfg.save(&path).unwrap();

        let loaded = CodecConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_reports_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("missing.toml");
        match CodecConfig::load(&path) {
            Err(ConfigError::Read { path: p, .. }) => assert!(p.ends_with("missing.toml")),
            other => panic!("expected read error, got {other:?}"),
        }

        std::fs::write(&path, "create_dirs = \"yes\"").unwrap();
        assert!(matches!(
            CodecConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
