use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::optimizer::{EvLimits, Weights};

/// Deployment configuration: default objective weights and charger limits
/// applied to requests that do not carry their own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub weights: Weights,
    pub ev_limits: EvLimits,
}

impl Config {
    /// Built-in defaults, overridden by `config/default.toml`, overridden
    /// by `EVSCHED__`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("EVSCHED__").split("__"));
        Ok(figment.extract()?)
    }
}
