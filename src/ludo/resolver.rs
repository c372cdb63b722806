use crate::ludo::{Color, Die, Token, TokenState, Track, TRACK_LEN};

/// What a single roll did to the active color's tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Slot of the token that entered play or started moving.
    pub moved: Option<usize>,
    pub pass_turn: bool,
}

/// Applies `die` to the first of `color`'s tokens that can use it.
///
/// Tokens are tried in slot order. A waiting token enters play on a six; an
/// idle token on the track starts moving if the roll does not carry it past
/// the end of its home lane. Only one token moves per roll. The turn passes
/// on every roll except a six.
pub fn resolve_turn(tokens: &mut [Token], track: &Track, color: Color, die: Die) -> Resolution {
    let entry = color.entry_index();
    let moved = tokens
        .iter_mut()
        .enumerate()
        .find_map(|(slot, token)| claim(token, track, color, entry, die).then_some(slot));

    match moved {
        Some(slot) => log::debug!("{color} rolled {die}, token {slot} moves"),
        None => log::debug!("{color} rolled {die}, no token can move"),
    }

    Resolution {
        moved,
        pass_turn: !die.is_six(),
    }
}

fn claim(token: &mut Token, track: &Track, color: Color, entry: u8, die: Die) -> bool {
    match token.state() {
        TokenState::Waiting if die.is_six() => {
            token.enter(entry, track.waypoint(color, entry));
            true
        }
        TokenState::OnTrack(index) if !token.in_transit() && index + die.value() < TRACK_LEN => {
            token.start_transit(die.value());
            true
        }
        _ => false,
    }
}
