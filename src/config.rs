use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_ENV_VAR: &str = "POKEMON_DETAILS_CONFIG";

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub pokemon: PokemonConfig,
    pub preferences: PreferencesConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PokemonConfig {
    pub api_url: String,
    // Seconds
    pub timeout: u32,
    pub sprite_url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PreferencesConfig {
    pub path: String,
}

impl Config {
    // Embedded defaults unless the env var points somewhere else
    pub fn load() -> Result<Self, AppError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_path(path),
            Err(_) => Self::from_toml_str(include_str!("../config/config.toml")),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!("Failed to read config file {}: {}", path.display(), e);
            AppError::from(e)
        })?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, AppError> {
        toml::from_str(config_str).map_err(|e| {
            tracing::error!("Failed to parse config: {}", e);
            AppError::from(e)
        })
    }

    pub fn avatar_url(&self, id: &str) -> String {
        format!("{}/{}.png", self.pokemon.sprite_url.trim_end_matches('/'), id)
    }
}
