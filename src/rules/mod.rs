//! Rules engine.
//!
//! `RulesEngine` is the seam callers program against; `Ludo` is the one
//! authoritative implementation of the race rules:
//! - Legal move enumeration for the pending die
//! - Move application with capture, finish, and win handling
//! - Turn advancement and the extra turn on a 6
//! - Forfeiting a die that cannot be used

pub mod engine;
pub mod ludo;

pub use engine::{GameResult, RulesEngine};
pub use ludo::Ludo;
