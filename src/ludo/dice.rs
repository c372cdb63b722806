use std::fmt::Display;

use nannou::geom::Rect;
use rand::Rng;

use crate::error::{Error, Result};

/// A single six-sided die showing a value in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Die {
    value: u8,
}

impl Die {
    pub const FACES: u8 = 6;

    /// Rejects anything that is not a face of the die.
    pub fn new(value: u8) -> Result<Self> {
        if (1..=Self::FACES).contains(&value) {
            Ok(Die { value })
        } else {
            Err(Error::InvalidDie(value))
        }
    }

    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Die { value: rng.random_range(1..=Self::FACES) }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_six(&self) -> bool {
        self.value == Self::FACES
    }

    /// Frame of the horizontal sprite sheet showing this face.
    pub fn sprite_frame(&self) -> u8 {
        self.value - 1
    }

    /// Horizontal pixel offset of this face in a sheet of `frame_width` wide frames.
    pub fn sprite_offset(&self, frame_width: f32) -> f32 {
        self.sprite_frame() as f32 * frame_width
    }

    /// This face's region of the sprite sheet in normalized texture coordinates.
    pub fn sprite_area(&self) -> Rect {
        let frames = Self::FACES as f32;
        let width = 1.0 / frames;
        let x = self.sprite_frame() as f32 * width + width / 2.0;
        Rect::from_x_y_w_h(x, 0.5, width, 1.0)
    }
}

/// The face shown before the first roll.
impl Default for Die {
    fn default() -> Self {
        Die { value: 1 }
    }
}

impl Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
