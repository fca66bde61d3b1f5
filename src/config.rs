use derive_more::Display;
use serde_derive::Deserialize;

pub const DEFAULT_LOG_FILE: &str = "/var/log/apache2/error.log";

#[derive(Deserialize, Debug, Eq, PartialEq)]
pub struct Config {
    /// Path of the error log, `-` for standard input.
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_file: default_log_file(),
        }
    }
}

#[derive(Debug, Display)]
pub enum ConfigError {
    #[display(fmt = "Failed to read config file {}: {}", _0, _1)]
    Read(String, std::io::Error),
    #[display(fmt = "Failed to parse config file {}: {}", _0, _1)]
    Parse(String, toml::de::Error),
}

impl std::error::Error for ConfigError {}

pub fn read_config(config_file: &str) -> Result<Config, ConfigError> {
    let config_str = std::fs::read_to_string(config_file)
        .map_err(|e| ConfigError::Read(config_file.to_string(), e))?;
    toml::from_str(&config_str).map_err(|e| ConfigError::Parse(config_file.to_string(), e))
}
