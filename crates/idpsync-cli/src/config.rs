//! CLI configuration

use anyhow::Result;
use secrecy::SecretString;
use serde::Deserialize;
use std::fmt;

use idpsync_ocm::{ConnectionConfig, DEFAULT_URL};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
}

#[derive(Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ApiSettings {
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            url: self.url.clone(),
            token: SecretString::from(self.token.clone()),
            timeout_secs: self.timeout_secs,
            ..ConnectionConfig::default()
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .set_default("api.url", DEFAULT_URL)?
            .set_default("api.timeout_secs", 30)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // IDPSYNC__API__TOKEN, IDPSYNC__API__URL, ...
            .add_source(
                config::Environment::with_prefix("IDPSYNC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                url: default_url(),
                token: String::new(),
                timeout_secs: default_timeout_secs(),
            },
        }
    }
}
