//! Piece progress.
//!
//! Internally a piece is a `PieceState` variant. The integer encoding used
//! by external storage only appears at the conversion functions here:
//!
//! | Code | State |
//! |---|---|
//! | `-1` | in yard |
//! | `0..=51` | ring offset relative to the color's entry cell |
//! | `100..=105` | home-lane offset plus 100 |
//! | `106` | finished |

use serde::{Deserialize, Serialize};

use super::track::{HOME_LANE_LEN, RING_LEN};

/// Pieces owned by each player.
pub const PIECES_PER_PLAYER: usize = 4;

/// Code for a piece waiting in its yard.
pub const YARD_CODE: i32 = -1;

/// Offset added to home-lane positions.
pub const HOME_CODE_BASE: i32 = 100;

/// Code for a finished piece.
pub const FINISHED_CODE: i32 = HOME_CODE_BASE + HOME_LANE_LEN as i32;

/// Where a single piece is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceState {
    /// Not yet entered.
    #[default]
    InYard,
    /// On the shared ring, offset relative to the owner's entry cell (0..52).
    OnRing(u8),
    /// In the owner's home lane (0..6).
    InHomeLane(u8),
    /// Reached the end of the home lane.
    Finished,
}

impl PieceState {
    /// State after moving `steps` cells into the home lane.
    ///
    /// Returns `None` when the steps overshoot the lane end.
    #[must_use]
    pub fn from_lane_offset(steps: u8) -> Option<Self> {
        match steps {
            s if s < HOME_LANE_LEN => Some(PieceState::InHomeLane(s)),
            s if s == HOME_LANE_LEN => Some(PieceState::Finished),
            _ => None,
        }
    }

    /// Decode an integer position code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            YARD_CODE => Some(PieceState::InYard),
            c if (0..RING_LEN as i32).contains(&c) => Some(PieceState::OnRing(c as u8)),
            c if (HOME_CODE_BASE..=FINISHED_CODE).contains(&c) => {
                Self::from_lane_offset((c - HOME_CODE_BASE) as u8)
            }
            _ => None,
        }
    }

    /// Encode as an integer position code.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            PieceState::InYard => YARD_CODE,
            PieceState::OnRing(offset) => offset as i32,
            PieceState::InHomeLane(offset) => HOME_CODE_BASE + offset as i32,
            PieceState::Finished => FINISHED_CODE,
        }
    }

    /// Relative ring offset, if on the ring.
    #[must_use]
    pub fn ring_offset(self) -> Option<u8> {
        match self {
            PieceState::OnRing(offset) => Some(offset),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        self == PieceState::Finished
    }

    /// Check that the payload is within its range.
    #[must_use]
    pub fn is_valid(self) -> bool {
        match self {
            PieceState::OnRing(offset) => offset < RING_LEN,
            PieceState::InHomeLane(offset) => offset < HOME_LANE_LEN,
            PieceState::InYard | PieceState::Finished => true,
        }
    }
}
