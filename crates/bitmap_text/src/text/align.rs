//! Block anchoring and per-line justification

use serde::{Deserialize, Serialize};

/// Where the text block sits relative to the entity's origin
///
/// Each anchor maps to a fixed `(horizontal, vertical)` factor pair in
/// `[-1, 0]`; the block is shifted by `size * factor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Align {
    /// Origin at the middle of the top edge
    North,
    /// Origin at the top-left corner
    NorthWest,
    /// Origin at the top-right corner
    NorthEast,
    /// Origin at the center of the block
    Center,
    /// Origin at the middle of the left edge
    West,
    /// Origin at the middle of the right edge
    East,
    /// Origin at the middle of the bottom edge
    South,
    /// Origin at the bottom-left corner
    #[default]
    SouthWest,
    /// Origin at the bottom-right corner
    SouthEast,
}

impl Align {
    /// All anchors
    pub const ALL: [Self; 9] = [
        Self::North,
        Self::NorthWest,
        Self::NorthEast,
        Self::Center,
        Self::West,
        Self::East,
        Self::South,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Horizontal shift as a fraction of block width
    pub const fn horizontal(self) -> f32 {
        match self {
            Self::NorthWest | Self::West | Self::SouthWest => 0.0,
            Self::North | Self::Center | Self::South => -0.5,
            Self::NorthEast | Self::East | Self::SouthEast => -1.0,
        }
    }

    /// Vertical shift as a fraction of block height
    pub const fn vertical(self) -> f32 {
        match self {
            Self::North | Self::NorthWest | Self::NorthEast => 0.0,
            Self::Center | Self::West | Self::East => -0.5,
            Self::South | Self::SouthWest | Self::SouthEast => -1.0,
        }
    }
}

/// Horizontal placement of each line inside the block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Justify {
    /// Lines start at the block's left edge
    #[default]
    Left,
    /// Lines are centered in the block
    Center,
    /// Lines end at the block's right edge
    Right,
}

impl Justify {
    /// Cursor start for a line of `line_width` inside a block of `block_width`
    pub fn line_offset(self, block_width: f32, line_width: f32) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5 * (block_width - line_width),
            Self::Right => block_width - line_width,
        }
    }
}
