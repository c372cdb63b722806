use hashbrown::HashMap;
use nannou::geom::{vec2, Vec2};
use serde::Deserialize;

use crate::ludo::Color;

pub const MAIN_LOOP_LEN: usize = 52;
pub const HOME_STRETCH_LEN: usize = 6;

/// Number of addressable track indices: the shared loop followed by one home lane.
pub const TRACK_LEN: u8 = (MAIN_LOOP_LEN + HOME_STRETCH_LEN) as u8;

/// Last slot of a home lane. A token that comes to rest here is finished.
pub const FINAL_INDEX: u8 = TRACK_LEN - 1;

/// Cells `(row, col)` of the 15x15 board traced by the shared loop, starting at
/// Red's entry and going clockwise around the cross.
#[rustfmt::skip]
const MAIN_LOOP_CELLS: [(u8, u8); MAIN_LOOP_LEN] = [
    (6, 0), (6, 1), (6, 2), (6, 3), (6, 4), (6, 5),
    (5, 6), (4, 6), (3, 6), (2, 6), (1, 6), (0, 6),
    (0, 7),
    (0, 8), (1, 8), (2, 8), (3, 8), (4, 8), (5, 8),
    (6, 9), (6, 10), (6, 11), (6, 12), (6, 13), (6, 14),
    (7, 14),
    (8, 14), (8, 13), (8, 12), (8, 11), (8, 10), (8, 9),
    (9, 8), (10, 8), (11, 8), (12, 8), (13, 8), (14, 8),
    (14, 7),
    (14, 6), (13, 6), (12, 6), (11, 6), (10, 6), (9, 6),
    (8, 5), (8, 4), (8, 3), (8, 2), (8, 1), (8, 0),
    (7, 0),
];

/// Pixel size of a board cell and the margin before the first one.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub cell: f32,
    pub offset: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry { cell: 45.0, offset: 35.0 }
    }
}

impl Geometry {
    /// Board coordinate of the cell at `(row, col)`; x grows right, y grows down.
    pub fn cell_at(&self, row: u8, col: u8) -> Vec2 {
        vec2(
            self.offset + col as f32 * self.cell,
            self.offset + row as f32 * self.cell,
        )
    }
}

pub fn main_loop_path(geometry: Geometry) -> [Vec2; MAIN_LOOP_LEN] {
    MAIN_LOOP_CELLS.map(|(row, col)| geometry.cell_at(row, col))
}

pub fn home_stretch_path(geometry: Geometry, color: Color) -> [Vec2; HOME_STRETCH_LEN] {
    color.home_lane_cells().map(|(row, col)| geometry.cell_at(row, col))
}

/// Waypoint tables for the shared loop and every color's home lane.
/// Built once and never mutated; track indices are the only way to address them.
#[derive(Debug, Clone)]
pub struct Track {
    geometry: Geometry,
    main_loop: [Vec2; MAIN_LOOP_LEN],
    home_stretches: HashMap<Color, [Vec2; HOME_STRETCH_LEN]>,
}

impl Track {
    pub fn new(geometry: Geometry) -> Self {
        let home_stretches = Color::ALL
            .into_iter()
            .map(|color| (color, home_stretch_path(geometry, color)))
            .collect();
        Track {
            geometry,
            main_loop: main_loop_path(geometry),
            home_stretches,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn main_loop(&self) -> &[Vec2; MAIN_LOOP_LEN] {
        &self.main_loop
    }

    pub fn home_stretch(&self, color: Color) -> &[Vec2; HOME_STRETCH_LEN] {
        &self.home_stretches[&color]
    }

    /// Waypoint at `index` along `color`'s route. Indices below [`MAIN_LOOP_LEN`]
    /// address the shared loop, the rest the color's home lane.
    ///
    /// Panics if `index` is not below [`TRACK_LEN`].
    pub fn waypoint(&self, color: Color, index: u8) -> Vec2 {
        assert!(index < TRACK_LEN, "track index {index} out of range");
        let index = index as usize;
        if index < MAIN_LOOP_LEN {
            self.main_loop[index]
        } else {
            self.home_stretch(color)[index - MAIN_LOOP_LEN]
        }
    }

    /// Resting place of `color`'s `slot`-th token before it enters play.
    pub fn yard(&self, color: Color, slot: usize) -> Vec2 {
        let (col, row) = color.yard_cell(slot);
        self.geometry.cell_at(row, col)
    }
}

impl Default for Track {
    fn default() -> Self {
        Track::new(Geometry::default())
    }
}
