//! Configuration for slowbar

use crate::error::Error;
use crate::workload::Workload;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Shape of the workload
    #[serde(default)]
    pub workload: Workload,

    /// Label drawn to the left of the bar
    #[serde(default = "default_label")]
    pub label: String,

    /// Log level, overridden by `--log-level`
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_label() -> String {
    "Working".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workload: Workload::default(),
            label: default_label(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        if let Some(config_path) = path {
            return Config::read(config_path);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("slowbar").join("slowbar.yml")),
            Some(PathBuf::from("slowbar.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Config::read(path);
            }
        }

        Ok(Config::default())
    }

    fn read(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let file = write("workload:\n  iterations: 7\nlabel: Crunching\n");
        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(7, config.workload.iterations);
        assert_eq!(1000, config.workload.steps);
        assert_eq!(0.05, config.workload.max_delay_secs);
        assert_eq!("Crunching", config.label);
        assert_eq!(None, config.log_level);
    }

    #[test]
    fn empty_mapping_is_default() {
        let file = write("{}\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(Config::default(), config);
    }

    #[test]
    fn roundtrip_through_yaml() {
        let config = Config {
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yml");
        let res = Config::load(Some(path.as_path()));
        assert!(matches!(res, Err(Error::ConfigRead { .. })));
    }

    #[test]
    fn malformed_file() {
        let file = write("workload: [1, 2\n");
        let res = Config::load(Some(file.path()));
        assert!(matches!(res, Err(Error::ConfigParse(_))));
    }
}
