use std::fmt::Display;

use serde::Deserialize;

/// One side of the board. Each color owns four tokens, a yard and a home lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    /// Main loop cell on which a freshly activated token appears.
    pub fn entry_index(&self) -> u8 {
        match self {
            Color::Red => 0,
            Color::Green => 13,
            Color::Yellow => 26,
            Color::Blue => 39,
        }
    }

    /// Grid cell `(col, row)` of the `slot`-th token waiting in the yard.
    pub fn yard_cell(&self, slot: usize) -> (u8, u8) {
        let (col, row) = match self {
            Color::Red => (1, 13),
            Color::Green => (13, 1),
            Color::Yellow => (13, 13),
            Color::Blue => (1, 1),
        };
        (col + (slot % 2) as u8, row + (slot / 2) as u8)
    }

    /// Grid cells `(row, col)` of the home lane, ordered from the loop toward the centre.
    pub fn home_lane_cells(&self) -> [(u8, u8); 6] {
        std::array::from_fn(|i| {
            let step = i as u8 + 1;
            match self {
                Color::Red => (7, step),
                Color::Green => (step, 7),
                Color::Yellow => (7, 14 - step),
                Color::Blue => (14 - step, 7),
            }
        })
    }

    /// The color seated after `self` in `seating`. Falls back to `self` when
    /// it is not seated at all.
    pub fn next_in(&self, seating: &[Color]) -> Color {
        match seating.iter().position(|c| c == self) {
            Some(i) => seating[(i + 1) % seating.len()],
            None => *self,
        }
    }

    /// A seating holds 2 to 4 colors, none of them twice.
    pub fn is_valid_seating(seating: &[Color]) -> bool {
        let distinct = seating
            .iter()
            .enumerate()
            .all(|(i, color)| !seating[..i].contains(color));
        distinct && (2..=Color::ALL.len()).contains(&seating.len())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_indices_are_a_quarter_loop_apart() {
        let entries = Color::ALL.map(|c| c.entry_index());
        assert_eq!(entries, [0, 13, 26, 39]);
    }

    #[test]
    fn test_next_in_two_player_seating() {
        let seating = [Color::Red, Color::Green];
        assert_eq!(Color::Red.next_in(&seating), Color::Green);
        assert_eq!(Color::Green.next_in(&seating), Color::Red);
        assert_eq!(Color::Blue.next_in(&seating), Color::Blue);
    }

    #[test]
    fn test_seating_rules() {
        assert!(Color::is_valid_seating(&[Color::Red, Color::Green]));
        assert!(Color::is_valid_seating(&Color::ALL));
        assert!(!Color::is_valid_seating(&[Color::Red]));
        assert!(!Color::is_valid_seating(&[Color::Red, Color::Green, Color::Red]));
    }

    #[test]
    fn test_yard_cells_form_a_square() {
        let cells: Vec<_> = (0..4).map(|i| Color::Red.yard_cell(i)).collect();
        assert_eq!(cells, vec![(1, 13), (2, 13), (1, 14), (2, 14)]);
    }

    #[test]
    fn test_home_lanes_end_next_to_centre() {
        assert_eq!(Color::Red.home_lane_cells()[5], (7, 6));
        assert_eq!(Color::Green.home_lane_cells()[5], (6, 7));
        assert_eq!(Color::Yellow.home_lane_cells()[5], (7, 8));
        assert_eq!(Color::Blue.home_lane_cells()[5], (8, 7));
    }
}
