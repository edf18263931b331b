use std::{path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
const DEFAULT_LOGS_DIR: &str = "./logs";

/// Configuration for the dashboard front end.
///
/// Read from the `greenprompt_dashboard` section, overridable through
/// `GREENPROMPT_DASHBOARD__<FIELD>` environment variables.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GreenPromptDashboardConfig {
    /// How often `watch` mode refreshes every region, in seconds.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Directory for the rolling JSON log file.
    #[serde(default = "default_logs_dir")]
    pub logs_dir: String,
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_logs_dir() -> String {
    DEFAULT_LOGS_DIR.to_string()
}

impl Default for GreenPromptDashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            logs_dir: DEFAULT_LOGS_DIR.to_string(),
        }
    }
}

impl GreenPromptDashboardConfig {
    /// Loads the `greenprompt_dashboard` section of a configuration file.
    ///
    /// A missing section yields the defaults; a malformed one is an error.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the section cannot be deserialized.
    pub fn from_file_path<P: AsRef<Path>>(config_file_path: P) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(config_file_path.as_ref()))
            .add_source(
                Environment::with_prefix("GREENPROMPT_DASHBOARD")
                    .keep_prefix(true)
                    .separator("__"),
            )
            .build()?;
        match config.get::<Self>("greenprompt_dashboard") {
            Ok(dashboard_config) => Ok(dashboard_config),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_section_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[greenprompt_dashboard]\nrefresh_interval_secs = 15\nlogs_dir = \"/tmp/gp-logs\""
        )
        .unwrap();
        let config = GreenPromptDashboardConfig::from_file_path(file.path()).unwrap();
        assert_eq!(config.refresh_interval(), Duration::from_secs(15));
        assert_eq!(config.logs_dir, "/tmp/gp-logs");
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[greenprompt_client]\nbase_url = \"http://localhost\"\ndefault_model = \"m\""
        )
        .unwrap();
        let config = GreenPromptDashboardConfig::from_file_path(file.path()).unwrap();
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.logs_dir, "./logs");
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = GreenPromptDashboardConfig {
            refresh_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }
}
