use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::DartsError;

/// Optional configuration file read from the working directory.
pub const CONFIG_FILE: &str = "darts.toml";

/// Prefix for environment overrides, e.g. `DARTS_DATABASE_URL`.
pub const ENV_PREFIX: &str = "DARTS_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub api_prefix: String,
    pub max_connections: u32,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://darts.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            api_prefix: "/api/v1".to_string(),
            max_connections: 5,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then `darts.toml`, then `DARTS_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, DartsError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, DartsError> {
        let cfg: Config = figment.extract()?;
        if cfg.max_connections == 0 {
            return Err(DartsError::Config(figment::Error::from(
                "max_connections must be at least 1".to_string(),
            )));
        }
        Ok(cfg)
    }
}
