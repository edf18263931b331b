use std::{path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Configuration for the GreenPrompt HTTP client.
///
/// Read from the `greenprompt_client` section of the configuration file, with every
/// field overridable through `GREENPROMPT_CLIENT__<FIELD>` environment variables.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GreenPromptClientConfig {
    /// Base URL of the GreenPrompt API, e.g. `http://localhost:7071`.
    ///
    /// All endpoints (`/api/carbon-intensity`, `/api/prompts`, ...) are resolved against it.
    pub base_url: String,

    /// Model identifier pre-filled in the prompt form.
    pub default_model: String,

    /// Optional per-request timeout, in milliseconds.
    ///
    /// When unset, requests never time out on the client side.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl GreenPromptClientConfig {
    /// Creates a new `GreenPromptClientConfig` instance from a configuration file.
    ///
    /// This method loads configuration settings from both a file and environment variables:
    /// - File: Reads the `greenprompt_client` section of the specified configuration file
    /// - Environment: Reads variables prefixed with `GREENPROMPT_CLIENT__`
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed, or if the
    /// `greenprompt_client` section is missing or malformed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use greenprompt_client::config::GreenPromptClientConfig;
    ///
    /// let config = GreenPromptClientConfig::from_file_path("config.toml")?;
    /// ```
    pub fn from_file_path<P: AsRef<Path>>(config_file_path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(config_file_path.as_ref()))
            .add_source(
                Environment::with_prefix("GREENPROMPT_CLIENT")
                    .keep_prefix(true)
                    .separator("__"),
            );
        builder.build()?.get::<Self>("greenprompt_client")
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
