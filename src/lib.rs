pub mod config;
pub mod error;
pub mod ludo;
pub mod simulate;

pub use crate::{
    config::Config,
    error::{Error, Result},
    ludo::{Color, Die, Game, GameOutcome, Geometry, Phase, Resolution, Token, TokenState, Track, TurnState},
};
