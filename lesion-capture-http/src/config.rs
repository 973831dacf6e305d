use std::time::Duration;

use thiserror::Error;

const ENV_INFERENCE_URL: &str = "DERMASENSE_INFERENCE_URL";
const ENV_RECOMMENDATION_URL: &str = "DERMASENSE_RECOMMENDATION_URL";
const ENV_TIMEOUT_SECS: &str = "DERMASENSE_REQUEST_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVariable(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("failed to build http client: {0}")]
    ClientBuild(String),
}

/// Service endpoints for the two remote collaborators.
///
/// Values come from `DERMASENSE_`-prefixed environment variables, matching
/// the service's own settings prefix. Credentials live server-side; this
/// client only ever sees base URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub inference_base_url: String,
    pub recommendation_base_url: String,
    pub request_timeout: Duration,
}

impl ServiceConfig {
    pub fn new(inference_base_url: &str, recommendation_base_url: &str) -> Self {
        Self {
            inference_base_url: trim_base_url(inference_base_url),
            recommendation_base_url: trim_base_url(recommendation_base_url),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let inference_base_url = lookup(ENV_INFERENCE_URL)
            .ok_or(ConfigError::MissingVariable(ENV_INFERENCE_URL))?;
        let recommendation_base_url = lookup(ENV_RECOMMENDATION_URL)
            .ok_or(ConfigError::MissingVariable(ENV_RECOMMENDATION_URL))?;

        let mut config = Self::new(&inference_base_url, &recommendation_base_url);

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_TIMEOUT_SECS,
                value: raw,
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            (ENV_INFERENCE_URL, &self.inference_base_url),
            (ENV_RECOMMENDATION_URL, &self.recommendation_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    name,
                    value: url.clone(),
                });
            }
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: ENV_TIMEOUT_SECS,
                value: "0".into(),
            });
        }
        Ok(())
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
