//! Layered application settings.
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `glucose-tracker.toml` in the working directory, then environment
//! variables such as `GLUCOSE_TRACKER__SERVER__PORT=9000`.

use serde::Deserialize;
use std::net::SocketAddr;
use thiserror::Error;

const CONFIG_FILE: &str = "glucose-tracker";
const ENV_PREFIX: &str = "GLUCOSE_TRACKER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid server address {0}")]
    InvalidAddress(String),
}

/// The root configuration structure for the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Origin allowed by the CORS layer
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// sqlx connection url, e.g. `sqlite:glucose-tracker.db`
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

/// Load settings from defaults, the optional config file and the environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();

    let builder = config::Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("server.allowed_origin", "http://localhost:8080")?
        .set_default("database.url", "sqlite:glucose-tracker.db")?
        .set_default("database.max_connections", 5)?
        .set_default("logging.filter", "info")?
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}
