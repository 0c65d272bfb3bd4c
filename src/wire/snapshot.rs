//! Binary snapshots.

use super::WireError;
use crate::core::state::GameState;

/// Encode a full state, history included.
pub fn encode_snapshot(state: &GameState) -> Result<Vec<u8>, WireError> {
    Ok(bincode::serialize(state)?)
}

/// Decode a snapshot. States that break an invariant are rejected.
pub fn decode_snapshot(bytes: &[u8]) -> Result<GameState, WireError> {
    Ok(bincode::deserialize(bytes)?)
}
