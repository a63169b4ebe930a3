//! Configuration file schema for bigocheck.
//!
//! A configuration tunes the engine heuristics and tells the batch front end
//! which files count as solutions.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::analysis::{detect_language, EngineConfig, Language};

/// Config file names searched for in the current directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["bigocheck.yaml", ".bigocheck.yaml"];

/// Largest accepted `constant_bound_limit`.
pub const MAX_CONSTANT_BOUND_LIMIT: u64 = 1_000_000;

/// Problems found while validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid excluded_paths pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("constant_bound_limit must be between 1 and {max}, got {value}")]
    ConstantBoundLimit { value: u64, max: u64 },

    #[error("solution_files must not be empty")]
    NoSolutionFiles,

    #[error("solution file {0:?} is not a Python, C or C++ file")]
    UnsupportedSolutionFile(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub engine: EngineConfig,
    /// File names tried, in order, when looking for a solution in a directory.
    #[serde(default = "default_solution_files")]
    pub solution_files: Vec<String>,
    /// Glob patterns for paths to skip during directory walks (e.g. "**/drafts/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

fn default_solution_files() -> Vec<String> {
    ["main.py", "main.cpp", "main.cc", "main.c"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            engine: EngineConfig::default(),
            solution_files: default_solution_files(),
            excluded_paths: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    /// Uses globset for matching, which supports `**` for recursive directory matching.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let limit = config.engine.constant_bound_limit;
    if limit == 0 || limit > MAX_CONSTANT_BOUND_LIMIT {
        return Err(ConfigError::ConstantBoundLimit {
            value: limit,
            max: MAX_CONSTANT_BOUND_LIMIT,
        });
    }

    if config.solution_files.is_empty() {
        return Err(ConfigError::NoSolutionFiles);
    }
    for name in &config.solution_files {
        if detect_language(name) == Language::Unknown {
            return Err(ConfigError::UnsupportedSolutionFile(name.clone()));
        }
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern).map_err(|source| ConfigError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
    }

    Ok(())
}

/// The per-user config file location, if the platform has one.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "bigocheck")
        .map(|d| d.config_dir().join("config.yaml"))
}

/// Find the config file to use, searching `dir` then the user config dir.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .chain(user_config_path())
        .find(|path| path.is_file())
}

/// Load the explicit config, a discovered one, or the defaults.
///
/// The returned path is `None` when the built-in defaults are used.
pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover(dir),
    };

    let config = match &path {
        Some(p) => {
            debug!(path = %p.display(), "loading config");
            Config::parse_file(p)?
        }
        None => {
            debug!("no config file found, using defaults");
            Config::default()
        }
    };

    validate(&config)?;
    Ok((config, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
version: "1"
engine:
  constant_bound_limit: 128
solution_files:
  - main.cpp
excluded_paths:
  - "**/drafts/**"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.engine.constant_bound_limit, 128);
        assert!(config.engine.amortized_linear);
        assert_eq!(config.solution_files, vec!["main.cpp"]);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(
            config.solution_files,
            vec!["main.py", "main.cpp", "main.cc", "main.c"]
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.engine.constant_bound_limit = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ConstantBoundLimit { value: 0, .. })
        ));

        let mut config = Config::default();
        config.solution_files.clear();
        assert!(matches!(validate(&config), Err(ConfigError::NoSolutionFiles)));

        let mut config = Config::default();
        config.solution_files = vec!["main.rs".to_string()];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::UnsupportedSolutionFile(_))
        ));

        let mut config = Config::default();
        config.excluded_paths = vec!["[".to_string()];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidGlob { .. })
        ));
    }

    #[test]
    fn test_is_path_excluded() {
        let config = Config {
            excluded_paths: vec!["**/drafts/**".to_string()],
            ..Config::default()
        };
        assert!(config.is_path_excluded(Path::new("problems/drafts/two-sum/main.py")));
        assert!(!config.is_path_excluded(Path::new("problems/two-sum/main.py")));
    }

    #[test]
    fn test_default_template_is_valid() {
        let config: Config =
            serde_yaml::from_str(include_str!("templates/default.yaml")).unwrap();
        assert!(validate(&config).is_ok());
        assert_eq!(config.engine, EngineConfig::default());
    }
}
