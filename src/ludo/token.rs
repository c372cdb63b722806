use nannou::geom::Vec2;

use crate::ludo::{Color, Track, FINAL_INDEX, TRACK_LEN};

pub const TOKENS_PER_PLAYER: usize = 4;

/// Where a token stands in its lifecycle. A token leaves the yard on a six and
/// becomes finished once it comes to rest on [`FINAL_INDEX`]; neither step is
/// ever undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Waiting,
    OnTrack(u8),
    Finished,
}

/// One playing piece. `position` is the rendered location and lags behind the
/// track index while the token is in transit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    state: TokenState,
    remaining_steps: u8,
    position: Vec2,
}

impl Token {
    /// Creates a token waiting in the yard at `position`.
    pub fn waiting(position: Vec2) -> Self {
        Token {
            state: TokenState::Waiting,
            remaining_steps: 0,
            position,
        }
    }

    /// Creates an idle token standing on the track at `index`, drawn at `position`.
    pub fn on_track(index: u8, position: Vec2) -> Self {
        assert!(index < TRACK_LEN, "track index {index} out of range");
        let state = if index == FINAL_INDEX {
            TokenState::Finished
        } else {
            TokenState::OnTrack(index)
        };
        Token {
            state,
            remaining_steps: 0,
            position,
        }
    }

    pub fn state(&self) -> TokenState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn remaining_steps(&self) -> u8 {
        self.remaining_steps
    }

    pub fn is_active(&self) -> bool {
        self.state != TokenState::Waiting
    }

    pub fn is_finished(&self) -> bool {
        self.state == TokenState::Finished
    }

    pub fn in_transit(&self) -> bool {
        self.remaining_steps > 0
    }

    /// Index of the waypoint the token stands on or is heading to.
    pub fn track_index(&self) -> Option<u8> {
        match self.state {
            TokenState::Waiting => None,
            TokenState::OnTrack(index) => Some(index),
            TokenState::Finished => Some(FINAL_INDEX),
        }
    }

    /// Puts a waiting token on `index` without animation.
    pub(crate) fn enter(&mut self, index: u8, position: Vec2) {
        debug_assert_eq!(self.state, TokenState::Waiting);
        self.state = TokenState::OnTrack(index);
        self.position = position;
    }

    /// Starts walking `steps` waypoints forward. The first hop is taken
    /// immediately; [`Token::advance`] takes the rest as waypoints are reached.
    pub(crate) fn start_transit(&mut self, steps: u8) {
        let TokenState::OnTrack(index) = self.state else {
            panic!("only a token on the track can move, got {:?}", self.state);
        };
        assert!(steps > 0 && index + steps < TRACK_LEN, "move of {steps} from {index} overshoots");
        self.remaining_steps = steps;
        self.state = TokenState::OnTrack(index + 1);
    }

    /// Moves the token up to `step` units toward its target waypoint.
    ///
    /// When the target is closer than `step` the token snaps onto it and
    /// either heads for the next waypoint or, with no hops left, comes to rest.
    /// Does nothing for a token that is not in transit.
    pub fn advance(&mut self, track: &Track, color: Color, step: f32) {
        if !self.in_transit() {
            return;
        }
        let TokenState::OnTrack(index) = self.state else {
            return;
        };

        let target = track.waypoint(color, index);
        let to_target = target - self.position;
        let distance = to_target.length();

        if distance < step || distance <= f32::EPSILON {
            self.position = target;
            self.remaining_steps -= 1;
            if self.remaining_steps > 0 {
                self.state = TokenState::OnTrack(index + 1);
            } else if index == FINAL_INDEX {
                self.state = TokenState::Finished;
                log::info!("{color} token reached home");
            }
        } else {
            self.position += to_target / distance * step;
        }
    }
}

#[cfg(test)]
mod tests {
    use nannou::geom::vec2;

    use super::*;

    const SPEED: f32 = 3.0;

    fn run_until_idle(token: &mut Token, track: &Track, color: Color) -> usize {
        let mut frames = 0;
        while token.in_transit() {
            token.advance(track, color, SPEED);
            frames += 1;
            assert!(frames < 10_000, "token never came to rest");
        }
        frames
    }

    #[test]
    fn test_idle_token_is_not_moved() {
        let track = Track::default();
        let mut token = Token::on_track(10, vec2(1.0, 2.0));
        let before = token;
        for _ in 0..10 {
            token.advance(&track, Color::Red, SPEED);
        }
        assert_eq!(token, before);

        let mut waiting = Token::waiting(vec2(5.0, 5.0));
        waiting.advance(&track, Color::Red, SPEED);
        assert_eq!(waiting, Token::waiting(vec2(5.0, 5.0)));
    }

    #[test]
    fn test_distance_shrinks_until_snap() {
        let track = Track::default();
        let start = track.waypoint(Color::Green, 20);
        let mut token = Token::on_track(20, start + vec2(-37.0, 81.5));
        token.start_transit(1);
        let target = track.waypoint(Color::Green, 21);

        let mut last = token.position().distance(target);
        while token.in_transit() {
            token.advance(&track, Color::Green, SPEED);
            let now = token.position().distance(target);
            if token.in_transit() {
                assert!(now < last);
                assert!((last - now - SPEED).abs() < 1e-3);
            }
            last = now;
        }
        assert_eq!(token.position(), target);
        assert_eq!(token.track_index(), Some(21));
    }

    #[test]
    fn test_walks_every_hop_in_order() {
        let track = Track::default();
        let mut token = Token::on_track(50, track.waypoint(Color::Red, 50));
        token.start_transit(4);
        assert_eq!(token.track_index(), Some(51));
        assert_eq!(token.remaining_steps(), 4);

        let mut visited = vec![];
        while token.in_transit() {
            let before = token.track_index();
            token.advance(&track, Color::Red, SPEED);
            if token.track_index() != before || !token.in_transit() {
                visited.push(token.position());
            }
        }
        let expected: Vec<_> = (51..=54).map(|i| track.waypoint(Color::Red, i)).collect();
        assert_eq!(visited, expected);
        assert_eq!(token.state(), TokenState::OnTrack(54));
    }

    #[test]
    fn test_frames_proportional_to_distance() {
        let track = Track::default();
        let mut token = Token::on_track(0, track.waypoint(Color::Red, 0));
        token.start_transit(2);
        let frames = run_until_idle(&mut token, &track, Color::Red);
        // two 45 unit hops at 3 units per frame
        assert!(frames <= 2 * (45 / 3 + 1));
    }

    #[test]
    fn test_landing_on_final_index_finishes() {
        let track = Track::default();
        let mut token = Token::on_track(55, track.waypoint(Color::Green, 55));
        token.start_transit(2);
        run_until_idle(&mut token, &track, Color::Green);
        assert!(token.is_finished());
        assert_eq!(token.track_index(), Some(FINAL_INDEX));
        assert_eq!(token.position(), track.home_stretch(Color::Green)[5]);
    }

    #[test]
    fn test_unbounded_step_snaps_one_hop_per_call() {
        let track = Track::default();
        let mut token = Token::on_track(3, track.waypoint(Color::Red, 3));
        token.start_transit(3);
        assert_eq!(run_until_idle_with(&mut token, &track, f32::INFINITY), 3);
        assert_eq!(token.track_index(), Some(6));
    }

    fn run_until_idle_with(token: &mut Token, track: &Track, step: f32) -> usize {
        let mut frames = 0;
        while token.in_transit() {
            token.advance(track, Color::Red, step);
            frames += 1;
        }
        frames
    }

    #[test]
    #[should_panic]
    fn test_overshooting_transit_panics() {
        let mut token = Token::on_track(55, Vec2::ZERO);
        token.start_transit(4);
    }
}
