//! Declarative client configuration, loadable from a config file or the environment.

use std::time::Duration;

use serde::Deserialize;

use crate::client::{BulkSmsError, Credentials, GatewayClient, GatewayClientBuilder};
use crate::domain::TestingMode;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {name} is required")]
    MissingVar { name: &'static str },

    #[error("environment variable {name} has an invalid value: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

/// Everything needed to build a [`GatewayClient`].
///
/// Deserializes from any serde format, e.g.
///
/// ```json
/// { "username": "user", "password": "secret", "testing": "always_succeed" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub testing: TestingMode,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl GatewayConfig {
    pub const USERNAME_VAR: &'static str = "BULKSMS_USERNAME";
    pub const PASSWORD_VAR: &'static str = "BULKSMS_PASSWORD";
    pub const SENDER_VAR: &'static str = "BULKSMS_SENDER";
    pub const TESTING_VAR: &'static str = "BULKSMS_TESTING";
    pub const BASE_URL_VAR: &'static str = "BULKSMS_BASE_URL";
    pub const TIMEOUT_SECS_VAR: &'static str = "BULKSMS_TIMEOUT_SECS";

    /// Read the configuration from `BULKSMS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar { name });

        let testing = match lookup(Self::TESTING_VAR) {
            None => TestingMode::None,
            Some(value) => parse_testing_mode(&value).ok_or(ConfigError::InvalidVar {
                name: Self::TESTING_VAR,
                value,
            })?,
        };
        let timeout_secs = match lookup(Self::TIMEOUT_SECS_VAR) {
            None => None,
            Some(value) => Some(value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: Self::TIMEOUT_SECS_VAR,
                value,
            })?),
        };

        Ok(Self {
            username: required(Self::USERNAME_VAR)?,
            password: required(Self::PASSWORD_VAR)?,
            sender: lookup(Self::SENDER_VAR),
            testing,
            base_url: lookup(Self::BASE_URL_VAR),
            timeout_secs,
            user_agent: None,
        })
    }

    /// Validate the values and turn them into a client builder.
    pub fn into_builder(self) -> Result<GatewayClientBuilder, BulkSmsError> {
        let mut credentials = Credentials::new(self.username, self.password)?;
        if let Some(sender) = self.sender {
            credentials = credentials.with_sender(sender)?;
        }

        let mut builder = GatewayClient::builder(credentials).testing_mode(self.testing);
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Ok(builder)
    }
}

impl GatewayClient {
    /// Build a client from a [`GatewayConfig`].
    pub fn from_config(config: GatewayConfig) -> Result<Self, BulkSmsError> {
        config.into_builder()?.build()
    }
}

fn parse_testing_mode(value: &str) -> Option<TestingMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "none" => Some(TestingMode::None),
        "always_succeed" | "succeed" => Some(TestingMode::AlwaysSucceed),
        "always_fail" | "fail" => Some(TestingMode::AlwaysFail),
        _ => None,
    }
}
