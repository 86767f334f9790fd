use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::response::ResponseConfig;
use super::schedule::ScheduleConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "schedule-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/schedule-dns/config.toml";

/// Main configuration structure for Schedule DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening port, bind address and capture interface
    #[serde(default)]
    pub server: ServerConfig,

    /// Where the talk dataset lives and how to read it
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// TXT answer shaping
    #[serde(default)]
    pub response: ResponseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. schedule-dns.toml in current directory
    /// 3. /etc/schedule-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::FileRead {
                path: path.into(),
                source,
            })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(interface) = overrides.interface_name {
            self.server.interface_name = interface;
        }
        if let Some(schedule) = overrides.schedule_path {
            self.schedule.path = schedule;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.interface_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Capture interface name cannot be empty".to_string(),
            ));
        }

        self.server.listen_addr()?;

        if self.schedule.slot_minutes == 0 {
            return Err(ConfigError::Validation(
                "Schedule slot length must be at least one minute".to_string(),
            ));
        }

        let fragment_size = self.response.fragment_size;
        if fragment_size < 8 || fragment_size % 8 != 0 {
            return Err(ConfigError::Validation(format!(
                "Fragment size {} must be a non-zero multiple of 8",
                fragment_size
            )));
        }

        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string).map_err(|source| ConfigError::FileWrite {
            path: path.into(),
            source,
        })?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub interface_name: Option<String>,
    pub schedule_path: Option<String>,
    pub log_level: Option<String>,
}
