use std::path::PathBuf;

use thiserror::Error;

use crate::ludo::Color;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config file {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Seating needs between 2 and 4 distinct colors.
    #[error("invalid players {0:?}: expected 2 to 4 distinct colors")]
    InvalidPlayers(Vec<Color>),

    #[error("die value {0} is outside 1..=6")]
    InvalidDie(u8),

    #[error("failed to load asset {path:?}: {message}")]
    Asset { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
