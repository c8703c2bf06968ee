//! Configuration management
//!
//! Settings are read once at startup from (lowest to highest priority)
//! built-in defaults, an optional `config/outbound.*` file and the process
//! environment. The result is an explicit [`Config`] that is handed to the
//! Retell client, the call service and the auth gate.

mod error;

pub use error::ConfigError;

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_RETELL_BASE_URL: &str = "https://api.retellai.com";

const CONFIG_FILE: &str = "config/outbound";

/// A credential that must never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub retell: RetellConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDRESS",
                reason: format!("'{}' is not a valid IP address", self.bind_address),
            })
    }
}

/// Retell account settings
#[derive(Debug, Clone)]
pub struct RetellConfig {
    pub base_url: String,
    pub api_key: Secret,
    /// Retell-managed number every outbound call is placed from
    pub phone_number: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Expected `x-api-key` value; `None` rejects every protected request
    pub api_key: Option<Secret>,
}

/// Flat view of the raw sources, keyed by lowercased environment name.
#[derive(Debug, Deserialize)]
struct RawSettings {
    bind_address: String,
    port: u16,
    api_key: Option<String>,
    retell_api_key: Option<String>,
    retell_phone_number: Option<String>,
    retell_base_url: String,
}

impl Config {
    /// Load from the optional config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(None)
    }

    /// Load with an explicit environment map instead of the process environment.
    pub fn from_env_map(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_sources(Some(vars))
    }

    fn from_sources(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("retell_base_url", DEFAULT_RETELL_BASE_URL)?;

        if env.is_none() {
            builder = builder.add_source(::config::File::with_name(CONFIG_FILE).required(false));
        }

        let raw: RawSettings = builder
            .add_source(::config::Environment::default().source(env))
            .build()?
            .try_deserialize()?;

        raw.try_into()
    }
}

impl TryFrom<RawSettings> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let api_key = non_empty(raw.retell_api_key).ok_or(ConfigError::Missing("RETELL_API_KEY"))?;
        let phone_number =
            non_empty(raw.retell_phone_number).ok_or(ConfigError::Missing("RETELL_PHONE_NUMBER"))?;

        let base_url = raw.retell_base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "RETELL_BASE_URL",
                reason: format!("'{}' is not an http(s) URL", base_url),
            });
        }

        Ok(Self {
            server: ServerConfig {
                bind_address: raw.bind_address,
                port: raw.port,
            },
            retell: RetellConfig {
                base_url,
                api_key: Secret::new(api_key),
                phone_number,
            },
            auth: AuthConfig {
                api_key: non_empty(raw.api_key).map(Secret::new),
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
