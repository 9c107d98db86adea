/// Runtime configuration
///
/// The API key is external configuration and never lives in the code.
/// It is read from the OMDB_API_KEY environment variable first, then
/// from config.toml in the user config directory. The config file can
/// also override the API base URL, which the default points at the
/// public OMDb endpoint.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "OMDB_API_KEY";

/// Errors while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("could not read {}: {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    /// The config file exists but is not valid TOML
    #[error("could not parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),
    /// Neither source provided an API key
    #[error("no API key found: set OMDB_API_KEY or put api_key in {}", .0.display())]
    MissingKey(PathBuf),
}

/// On-disk config file shape
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_key: Option<String>,
    base_url: Option<String>,
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Static key sent with every API request
    pub api_key: String,
    /// Endpoint all requests are issued against
    pub base_url: String,
}

impl Config {
    /// Load configuration, preferring the environment over the file.
    pub fn load() -> Result<Self, ConfigError> {
        let file_path = config_file_path();

        let file = if file_path.exists() {
            let contents = std::fs::read_to_string(&file_path)
                .map_err(|e| ConfigError::Io(file_path.clone(), e))?;
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(file_path.clone(), e))?
        } else {
            ConfigFile::default()
        };

        let env_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());

        Self::resolve(env_key, file).ok_or(ConfigError::MissingKey(file_path))
    }

    /// Combine both sources into a resolved config
    fn resolve(env_key: Option<String>, file: ConfigFile) -> Option<Self> {
        let api_key = env_key.or(file.api_key)?;
        let base_url = file
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Some(Config { api_key, base_url })
    }
}

/// Where the config file lives
/// Returns ~/.config/movie-search/config.toml on Linux
fn config_file_path() -> PathBuf {
    let mut path = dirs::config_dir()
        .or_else(|| dirs::home_dir())
        .expect("Could not determine config directory");

    path.push("movie-search");
    path.push("config.toml");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_wins_over_file_key() {
        let file: ConfigFile = toml::from_str("api_key = \"from-file\"").unwrap();

        let config = Config::resolve(Some("from-env".to_string()), file).unwrap();

        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_file_key_used_when_env_is_absent() {
        let file: ConfigFile =
            toml::from_str("api_key = \"from-file\"\nbase_url = \"http://localhost:9090/\"")
                .unwrap();

        let config = Config::resolve(None, file).unwrap();

        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.base_url, "http://localhost:9090/");
    }

    #[test]
    fn test_missing_key_everywhere_fails() {
        assert!(Config::resolve(None, ConfigFile::default()).is_none());
    }

    #[test]
    fn test_malformed_config_file_is_rejected() {
        assert!(toml::from_str::<ConfigFile>("api_key = [1, 2]").is_err());
    }
}
