//! # ludo-engine
//!
//! Deterministic rules engine for a four-color race board game.
//!
//! ## Design Principles
//!
//! 1. **States Are Values**: Every operation takes `&GameState` and returns a
//!    new state. A rejected request never changes anything.
//!
//! 2. **One Authority**: `Ludo` is the only place rules are decided. Rooms,
//!    clients, and replays all go through the same `RulesEngine`.
//!
//! 3. **Codes At The Edge**: Pieces are an enum internally. The integer
//!    position codes used by storage only appear in `wire`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so successor
//!   states share everything they did not change.
//!
//! - **Deterministic Dice**: `GameRng` is a seeded ChaCha8 stream; a seed and
//!   a list of requests replay a match exactly.
//!
//! ## Modules
//!
//! - `core`: Players, colors, pieces, track math, state, moves, RNG, config
//! - `board`: Drawing geometry for the 15x15 board
//! - `rules`: `RulesEngine` trait and the `Ludo` implementation
//! - `lifecycle`: Match setup, die draws, and the in-memory `Room`
//! - `wire`: JSON interchange and binary snapshots

pub mod core;
pub mod board;
pub mod rules;
pub mod lifecycle;
pub mod wire;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, Color, ColorMap,
    PieceState, Move, MoveKind, Capture,
    GameState, MatchStatus, Seat, Transition,
    GameRng, GameRngState, DiceSource,
    RulesConfig, SafeCellRule,
    RuleError,
};

pub use crate::board::{BoardGeometry, Point};

pub use crate::rules::{RulesEngine, GameResult, Ludo};

pub use crate::lifecycle::{Room, initial_state, start_match, draw_die, roll_die};

pub use crate::wire::{WireState, WireMove, WireError, encode_snapshot, decode_snapshot};
