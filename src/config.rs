//! Configuration management for the lobby server
//!
//! Values are layered: built-in defaults, then an optional `lobby.toml`
//! (or the file named by `LOBBY_CONFIG`), then `LOBBY_*` environment
//! variables. The binary applies its `PORT` argument last.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::registry::NameReusePolicy;

pub const DEFAULT_PORT: u16 = 27428;
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 200;

const DEFAULT_CONFIG_FILE: &str = "lobby";
const CONFIG_FILE_VAR: &str = "LOBBY_CONFIG";
const ENV_PREFIX: &str = "LOBBY";

/// Complete server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address the listener binds to
    /// Environment: LOBBY_BIND_ADDRESS
    pub bind_address: String,

    /// TCP port the listener binds to
    /// Environment: LOBBY_PORT
    pub port: u16,

    /// Longest accepted request line, and longest response, in bytes
    pub max_message_length: usize,

    /// Ceiling on concurrent sessions, 0 for unbounded
    /// Environment: LOBBY_MAX_SESSIONS
    pub max_sessions: usize,

    /// Seconds a session may stay silent before it is closed, 0 to wait forever
    pub idle_timeout_secs: u64,

    /// Whether departed players' names can be joined again
    /// Environment: LOBBY_NAME_REUSE (reserved | after_departure)
    pub name_reuse: NameReusePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
            max_sessions: 0,
            idle_timeout_secs: 0,
            name_reuse: NameReusePolicy::Reserved,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the config file (if any) with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_FILE_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());

        let settings = Self::defaults()?
            .add_source(File::with_name(&path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from TOML text layered over the defaults
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let settings = Self::defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;

        Self::finish(settings)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("max_message_length", defaults.max_message_length as i64)?
            .set_default("max_sessions", defaults.max_sessions as i64)?
            .set_default("idle_timeout_secs", defaults.idle_timeout_secs as i64)?
            .set_default("name_reuse", defaults.name_reuse.to_string())
    }

    fn finish(settings: Config) -> Result<Self, ConfigError> {
        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.max_message_length == 0 {
            return Err(ConfigError::Message(
                "max_message_length must be greater than 0".into(),
            ));
        }

        if self.bind_address.parse::<IpAddr>().is_err() {
            return Err(ConfigError::Message(format!(
                "bind_address is not an IP address: {}",
                self.bind_address
            )));
        }

        Ok(())
    }

    /// Get bind address and port as a socket address
    pub fn listen_socket(&self) -> Option<SocketAddr> {
        let ip = self.bind_address.parse::<IpAddr>().ok()?;
        Some(SocketAddr::new(ip, self.port))
    }

    /// Get the idle timeout, if one is configured
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }

    /// Get the session ceiling, if one is configured
    pub fn session_limit(&self) -> Option<usize> {
        (self.max_sessions > 0).then_some(self.max_sessions)
    }
}
