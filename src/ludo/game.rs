use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::ludo::{resolve_turn, Color, Die, Geometry, Resolution, Token, Track, TOKENS_PER_PLAYER};

/// Where the frame loop stands with respect to the current roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WaitingForRoll,
    /// A roll was taken and is resolved on the next tick.
    Resolving(Die),
    /// Resolved; waiting for every token to come to rest.
    Animating,
    Over(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Win(Color),
}

/// Whose turn it is and what the last roll was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub active: Color,
    pub phase: Phase,
    pub last_roll: Option<Die>,
}

impl TurnState {
    pub fn new(active: Color) -> Self {
        TurnState {
            active,
            phase: Phase::WaitingForRoll,
            last_roll: None,
        }
    }

    /// Records a roll. Ignored unless the state is waiting for one.
    pub fn rolled(self, die: Die) -> Self {
        match self.phase {
            Phase::WaitingForRoll => TurnState {
                phase: Phase::Resolving(die),
                last_roll: Some(die),
                ..self
            },
            _ => self,
        }
    }

    /// State after `resolution` has been applied; `next` takes over if the turn passes.
    pub fn resolved(self, resolution: Resolution, next: Color) -> Self {
        TurnState {
            active: if resolution.pass_turn { next } else { self.active },
            phase: Phase::Animating,
            ..self
        }
    }
}

/// Drives a whole game: owns the track, every seated color's tokens and the turn state.
#[derive(Debug, Clone)]
pub struct Game {
    track: Track,
    players: Vec<Color>,
    tokens: HashMap<Color, [Token; TOKENS_PER_PLAYER]>,
    turn: TurnState,
}

impl Game {
    /// Seats `players` in order; the first one rolls first.
    pub fn new(players: &[Color], geometry: Geometry) -> Result<Self> {
        if !Color::is_valid_seating(players) {
            return Err(Error::InvalidPlayers(players.to_vec()));
        }

        let track = Track::new(geometry);
        let tokens = players
            .iter()
            .map(|&color| {
                let tokens = std::array::from_fn(|slot| Token::waiting(track.yard(color, slot)));
                (color, tokens)
            })
            .collect();

        Ok(Game {
            track,
            players: players.to_vec(),
            tokens,
            turn: TurnState::new(players[0]),
        })
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn players(&self) -> &[Color] {
        &self.players
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn active_color(&self) -> Color {
        self.turn.active
    }

    pub fn tokens(&self, color: Color) -> Option<&[Token; TOKENS_PER_PLAYER]> {
        self.tokens.get(&color)
    }

    pub fn tokens_mut(&mut self, color: Color) -> Option<&mut [Token; TOKENS_PER_PLAYER]> {
        self.tokens.get_mut(&color)
    }

    pub fn all_tokens(&self) -> impl Iterator<Item = (Color, &Token)> {
        self.tokens
            .iter()
            .flat_map(|(&color, tokens)| tokens.iter().map(move |token| (color, token)))
    }

    /// True while no token of any color is in transit.
    pub fn is_idle(&self) -> bool {
        self.all_tokens().all(|(_, token)| !token.in_transit())
    }

    pub fn can_roll(&self) -> bool {
        self.turn.phase == Phase::WaitingForRoll
    }

    /// Takes a roll for the active color. Returns `false` and changes nothing
    /// if rolling is not allowed right now.
    pub fn roll(&mut self, die: Die) -> bool {
        if !self.can_roll() {
            return false;
        }
        log::debug!("{} rolled {die}", self.turn.active);
        self.turn = self.turn.rolled(die);
        true
    }

    /// Runs one frame: moves every token in transit by up to `step` units,
    /// resolves a pending roll and re-enables rolling once the board is still.
    pub fn tick(&mut self, step: f32) -> Option<Resolution> {
        for (&color, tokens) in self.tokens.iter_mut() {
            for token in tokens.iter_mut() {
                token.advance(&self.track, color, step);
            }
        }

        let resolution = match self.turn.phase {
            Phase::Resolving(die) => {
                let color = self.turn.active;
                let tokens = self
                    .tokens
                    .get_mut(&color)
                    .expect("active color is always seated");
                let resolution = resolve_turn(tokens, &self.track, color, die);
                let next = color.next_in(&self.players);
                self.turn = self.turn.resolved(resolution, next);
                if resolution.pass_turn {
                    log::debug!("turn passes from {color} to {next}");
                }
                Some(resolution)
            }
            _ => None,
        };

        if self.turn.phase == Phase::Animating && self.is_idle() {
            self.turn.phase = match self.outcome() {
                GameOutcome::Win(color) => {
                    log::info!("{color} wins");
                    Phase::Over(color)
                }
                GameOutcome::Ongoing => Phase::WaitingForRoll,
            };
        }

        resolution
    }

    /// Ticks with an unbounded step until the board is still.
    pub fn settle(&mut self) {
        while !self.is_idle() || matches!(self.turn.phase, Phase::Resolving(_)) {
            self.tick(f32::INFINITY);
        }
        if self.turn.phase == Phase::Animating {
            self.tick(f32::INFINITY);
        }
    }

    /// The first seated color, in seating order, with every token finished.
    pub fn outcome(&self) -> GameOutcome {
        self.players
            .iter()
            .find(|color| self.tokens[*color].iter().all(Token::is_finished))
            .map_or(GameOutcome::Ongoing, |&color| GameOutcome::Win(color))
    }
}
