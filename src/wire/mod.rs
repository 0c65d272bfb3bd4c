//! Interchange encodings.
//!
//! ## JSON
//!
//! `WireState` and `WireMove` are the shapes shared with storage and
//! clients. Pieces travel as integer position codes (see `core::piece`), and
//! field names are camelCase. Every decode goes through `GameState::validate`,
//! so a state that reaches the engine from outside is always well formed.
//!
//! ## Snapshots
//!
//! `encode_snapshot`/`decode_snapshot` write the full `GameState`, history
//! included, with bincode. Useful for checkpointing a room or shipping a
//! state between processes that both run this crate.

mod snapshot;
mod state;

use thiserror::Error;

use crate::core::error::RuleError;
use crate::core::player::PlayerId;

pub use snapshot::{decode_snapshot, encode_snapshot};
pub use state::{state_from_json, state_to_json, WireMove, WireState};

/// Errors raised at the interchange boundary.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed snapshot: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("invalid position code {code} for {player}")]
    InvalidPositionCode { player: PlayerId, code: i32 },

    #[error("invalid state: {0}")]
    State(#[from] RuleError),
}
