use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Name used for the data directory and log file
pub const APP_NAME: &str = "version-compat";

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No acceptable versions listed for {0}")]
    EmptyRequirement(String),
}

/// Compatibility check configuration
///
/// ```json
/// {
///   "principal": "app-1.0.0.jar",
///   "classpath": ["lib"],
///   "requirements": {
///     "org.slf4j-slf4j-api": ["1.7.25", "2.0"]
///   }
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CompatConfig {
    /// Jar holding the application itself; excluded from the checked components
    pub principal: Option<String>,
    /// Jar files or directories of jars to scan
    pub classpath: Vec<PathBuf>,
    /// Component to acceptable versions, the first being the required one
    pub requirements: IndexMap<String, Vec<String>>,
    pub log: LogConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    /// Write JSON logs to [`log_dir`] instead of stderr
    pub to_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            to_file: false,
        }
    }
}

impl CompatConfig {
    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: CompatConfig = serde_json::from_str(content)?;

        if let Some((component, _)) = config
            .requirements
            .iter()
            .find(|(_, versions)| versions.is_empty())
        {
            return Err(ConfigError::EmptyRequirement(component.clone()));
        }

        Ok(config)
    }
}

/// Returns the path to the data directory for version-compat.
/// Uses $XDG_DATA_HOME/version-compat if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-compat,
/// or ./version-compat if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the directory log files are written to.
pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn compat_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = CompatConfig::from_json(r#"{ "classpath": ["lib"] }"#).unwrap();

        assert_eq!(result.classpath, vec![PathBuf::from("lib")]);
        assert_eq!(result.principal, None);
        assert!(result.requirements.is_empty());
        assert_eq!(result.log, LogConfig::default());
    }

    #[test]
    fn compat_config_from_full_object_parses_all_fields() {
        let result = CompatConfig::from_json(
            r#"{
                "principal": "app-1.0.0.jar",
                "classpath": ["lib", "ext/extra.jar"],
                "requirements": {
                    "org.slf4j-slf4j-api": ["1.7.25", "2.0"],
                    "jsr305-3.0.1.jar": ["3"]
                },
                "log": { "level": "debug", "toFile": true }
            }"#,
        )
        .unwrap();

        assert_eq!(
            result,
            CompatConfig {
                principal: Some("app-1.0.0.jar".to_string()),
                classpath: vec![PathBuf::from("lib"), PathBuf::from("ext/extra.jar")],
                requirements: IndexMap::from([
                    (
                        "org.slf4j-slf4j-api".to_string(),
                        vec!["1.7.25".to_string(), "2.0".to_string()]
                    ),
                    ("jsr305-3.0.1.jar".to_string(), vec!["3".to_string()]),
                ]),
                log: LogConfig {
                    level: "debug".to_string(),
                    to_file: true,
                },
            }
        );
    }

    #[test]
    fn compat_config_keeps_requirement_order() {
        let result =
            CompatConfig::from_json(r#"{ "requirements": { "z": ["1"], "a": ["1"], "m": ["1"] } }"#)
                .unwrap();

        let order: Vec<&str> = result.requirements.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["z", "a", "m"]);
    }

    #[test]
    fn compat_config_rejects_empty_requirement() {
        let result = CompatConfig::from_json(r#"{ "requirements": { "a.jar": [] } }"#);

        assert!(matches!(result, Err(ConfigError::EmptyRequirement(c)) if c == "a.jar"));
    }

    #[test]
    fn compat_config_load_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = CompatConfig::load(&temp_dir.path().join("missing.json"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn compat_config_load_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("compat.json");
        std::fs::write(&path, r#"{ "requirements": { "a.jar": ["1.0"] } }"#).unwrap();

        let result = CompatConfig::load(&path).unwrap();

        assert_eq!(result.requirements["a.jar"], vec!["1.0".to_string()]);
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/version-compat"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.local/share/version-compat"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./version-compat"));
    }
}
