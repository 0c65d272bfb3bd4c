//! Core engine types: players, pieces, track math, state, moves, RNG,
//! configuration, and errors.
//!
//! Everything here is pure data plus index math. Rules live in `rules`;
//! match setup lives in `lifecycle`.

pub mod player;
pub mod piece;
pub mod track;
pub mod occupancy;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{Color, ColorMap, PlayerId};
pub use piece::{PieceState, PIECES_PER_PLAYER};
pub use track::{
    absolute_start_index, is_safe_cell, ring_index_to_absolute, ENTRY_ROLL, EXTRA_TURN_ROLL,
    HOME_LANE_LEN, RING_LEN, SAFE_CELLS,
};
pub use occupancy::{Occupancy, Occupant};
pub use rng::{DiceSource, GameRng, GameRngState};
pub use config::{ConfigError, RulesConfig, SafeCellRule};
pub use action::{Capture, Move, MoveKind, TurnAction, TurnRecord};
pub use state::{GameState, MatchStatus, Pieces, Seat, Transition};
pub use error::RuleError;
