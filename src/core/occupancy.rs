//! Ring occupancy lookup.
//!
//! Maps each absolute ring index to the pieces standing on it. Built fresh
//! from a state whenever legal moves are enumerated.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::player::{Color, PlayerId};
use super::state::GameState;
use super::track::ring_index_to_absolute;

/// A piece standing on a ring cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub player: PlayerId,
    pub piece: usize,
    pub color: Color,
}

/// Absolute ring index -> occupants, in turn order then piece slot.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    cells: FxHashMap<u8, SmallVec<[Occupant; 4]>>,
}

impl Occupancy {
    /// Collect every ring piece in the state.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let mut cells: FxHashMap<u8, SmallVec<[Occupant; 4]>> = FxHashMap::default();

        for seat in state.seats() {
            let Some(pieces) = state.pieces(&seat.id) else {
                continue;
            };
            for (slot, piece) in pieces.iter().enumerate() {
                if let Some(offset) = piece.ring_offset() {
                    let absolute = ring_index_to_absolute(seat.color, offset);
                    cells.entry(absolute).or_default().push(Occupant {
                        player: seat.id.clone(),
                        piece: slot,
                        color: seat.color,
                    });
                }
            }
        }

        Self { cells }
    }

    /// Occupants of an absolute ring index (empty if none).
    #[must_use]
    pub fn at(&self, absolute: u8) -> &[Occupant] {
        self.cells.get(&absolute).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Check whether every occupant of a cell belongs to `player`.
    ///
    /// Vacuously true for an empty cell.
    #[must_use]
    pub fn held_only_by(&self, absolute: u8, player: &PlayerId) -> bool {
        self.at(absolute).iter().all(|o| &o.player == player)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
