use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Optional on-disk settings. Everything here has a CLI flag that wins over
/// it, and a missing config file just means defaults.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Webhook endpoint to post messages to.
    pub endpoint: Option<String>,
    /// Transcript log file, enabled at startup when set.
    #[serde(rename = "log-file")]
    pub log_file: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(config_path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        match ProjectDirs::from("org", "construct", "construct") {
            Some(proj_dirs) => proj_dirs.config_dir().join("config.toml"),
            None => PathBuf::from("config.toml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(config.endpoint.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            endpoint: Some("http://localhost:8080/hook".to_string()),
            log_file: Some("chat.log".to_string()),
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.endpoint.as_deref(), Some("http://localhost:8080/hook"));
        assert_eq!(loaded.log_file.as_deref(), Some("chat.log"));
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "endpoint = \"http://x/\"\nfuture-knob = true\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://x/"));
    }
}
