//! Client configuration.

use std::env;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::ConfigError;

/// Default Sloth API base URL (test instance)
pub const DEFAULT_BASE_URL: &str = "https://sloth-api-test.azurewebsites.net/";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options bound into a client at construction
#[derive(Debug, Clone)]
pub struct SlothApiClientOptions {
    pub base_url: String,
    pub api_key: SecretString,
    pub timeout: Duration,
}

impl Default for SlothApiClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: SecretString::from(""),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SlothApiClientOptions {
    /// Options with the default base URL and the given key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply `configure` to the defaults and validate the result.
    ///
    /// A missing key fails here rather than on the first request.
    pub fn configure<F>(configure: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&mut SlothApiClientOptions),
    {
        let mut options = Self::default();
        configure(&mut options);
        options.validate()?;
        Ok(options)
    }

    /// Load options from `SLOTH_API_KEY`, `SLOTH_BASE_URL` and `SLOTH_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("SLOTH_API_KEY").unwrap_or_default();
        let base_url = env::var("SLOTH_BASE_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = match env::var("SLOTH_TIMEOUT_SECS") {
            Ok(value) => {
                let secs = value.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                    name: "SLOTH_TIMEOUT_SECS",
                    message: e.to_string(),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_TIMEOUT,
        };

        let options = Self {
            base_url,
            api_key: SecretString::from(api_key),
            timeout,
        };
        options.validate()?;
        Ok(options)
    }

    /// Check the options a client cannot be built without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "timeout",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
