//! Track index math.
//!
//! Pieces record their progress relative to their own color's entry cell.
//! The shared ring is addressed by absolute indices 0..52, where red's entry
//! cell is 0 and the other colors enter a quarter-lap apart.

use super::player::Color;

/// Cells on the shared ring.
pub const RING_LEN: u8 = 52;

/// Cells in each color's home lane. Overflowing by exactly this many
/// steps finishes the piece.
pub const HOME_LANE_LEN: u8 = 6;

/// Die value required to bring a piece out of the yard.
pub const ENTRY_ROLL: u8 = 6;

/// Die value that lets the mover act again.
pub const EXTRA_TURN_ROLL: u8 = 6;

/// Absolute ring indices where a lone piece cannot be captured:
/// each color's entry cell plus one more cell per quarter.
pub const SAFE_CELLS: [u8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// Absolute ring index of a color's entry cell.
#[must_use]
pub const fn absolute_start_index(color: Color) -> u8 {
    match color {
        Color::Red => 0,
        Color::Blue => 13,
        Color::Yellow => 26,
        Color::Green => 39,
    }
}

/// Convert a color-relative ring offset (0..52) to an absolute ring index.
#[must_use]
pub fn ring_index_to_absolute(color: Color, relative_offset: u8) -> u8 {
    debug_assert!(relative_offset < RING_LEN, "relative offset out of range");
    ((absolute_start_index(color) as u16 + relative_offset as u16) % RING_LEN as u16) as u8
}

/// Check whether an absolute ring index is a safe cell.
#[must_use]
pub fn is_safe_cell(absolute: u8) -> bool {
    SAFE_CELLS.contains(&absolute)
}
