use palabras_core::GameConfig;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("Failed to read game config {path}: {source}")]
    ReadGameConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid game config {path}: {source}")]
    ParseGameConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub public_dir: PathBuf,
    pub words_file: PathBuf,
    pub words_url: Option<String>,
    pub points_file: PathBuf,
    pub points_backup_file: Option<PathBuf>,
    pub player_name: Option<String>,
    pub game_config_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = match var("HOST") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "HOST",
                value,
            })?,
            None => IpAddr::from([127, 0, 0, 1]),
        };
        let port = match var("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => 3000,
        };

        Ok(Self {
            host,
            port,
            public_dir: var("PUBLIC_DIR").unwrap_or_else(|| "./public".to_string()).into(),
            words_file: var("WORDS_FILE")
                .unwrap_or_else(|| "./data/words.json".to_string())
                .into(),
            words_url: var("WORDS_URL"),
            points_file: var("POINTS_FILE")
                .unwrap_or_else(|| "./data/points.json".to_string())
                .into(),
            points_backup_file: var("POINTS_BACKUP_FILE").map(PathBuf::from),
            player_name: var("PLAYER_NAME"),
            game_config_file: var("GAME_CONFIG").map(PathBuf::from),
        })
    }

    /// Game tunables from `GAME_CONFIG` (defaults when unset), with
    /// `PLAYER_NAME` taking precedence over the file
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let config = match &self.game_config_file {
            Some(path) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::ReadGameConfig {
                        path: path.clone(),
                        source,
                    })?;
                serde_json::from_str(&contents).map_err(|source| {
                    ConfigError::ParseGameConfig {
                        path: path.clone(),
                        source,
                    }
                })?
            }
            None => GameConfig::default(),
        };

        Ok(match &self.player_name {
            Some(name) => config.with_player_name(name),
            None => config,
        })
    }
}
