//! JSON-facing state and move shapes.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::WireError;
use crate::core::action::{Capture, Move, MoveKind};
use crate::core::error::RuleError;
use crate::core::piece::{PieceState, PIECES_PER_PLAYER};
use crate::core::player::{Color, PlayerId};
use crate::core::state::{GameState, MatchStatus, Pieces};

/// Match state with pieces as integer position codes.
///
/// ```
/// use ludo_engine::core::{Color, GameState, PlayerId, Seat};
/// use ludo_engine::wire::WireState;
///
/// let state = GameState::new(&[Seat::new("a", Color::Red), Seat::new("b", Color::Blue)]).unwrap();
/// let wire = WireState::from(&state);
/// assert_eq!(wire.positions[&PlayerId::new("a")], [-1, -1, -1, -1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireState {
    pub status: MatchStatus,
    pub order: Vec<PlayerId>,
    pub colors: BTreeMap<PlayerId, Color>,
    pub turn_index: usize,
    pub dice: Option<u8>,
    pub positions: BTreeMap<PlayerId, [i32; PIECES_PER_PLAYER]>,
    pub winners: Vec<PlayerId>,
}

impl From<&GameState> for WireState {
    fn from(state: &GameState) -> Self {
        Self {
            status: state.status,
            order: state.order.iter().cloned().collect(),
            colors: state
                .colors
                .iter()
                .map(|(id, color)| (id.clone(), *color))
                .collect(),
            turn_index: state.turn_index,
            dice: state.dice,
            positions: state
                .positions
                .iter()
                .map(|(id, pieces)| (id.clone(), (*pieces).map(PieceState::code)))
                .collect(),
            winners: state.winners.iter().cloned().collect(),
        }
    }
}

impl TryFrom<WireState> for GameState {
    type Error = WireError;

    /// Decode and validate. History starts empty.
    fn try_from(wire: WireState) -> Result<Self, Self::Error> {
        let mut positions = im::OrdMap::new();
        for (player, codes) in wire.positions {
            let mut pieces: Pieces = [PieceState::InYard; PIECES_PER_PLAYER];
            for (slot, code) in codes.into_iter().enumerate() {
                pieces[slot] = PieceState::from_code(code).ok_or_else(|| {
                    WireError::InvalidPositionCode {
                        player: player.clone(),
                        code,
                    }
                })?;
            }
            positions.insert(player, pieces);
        }

        let state = GameState {
            status: wire.status,
            order: wire.order.into_iter().collect(),
            colors: wire.colors.into_iter().collect(),
            turn_index: wire.turn_index,
            dice: wire.dice,
            positions,
            winners: wire.winners.into_iter().collect(),
            history: Vector::new(),
        };
        state.validate()?;
        Ok(state)
    }
}

/// A move as clients submit and display it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMove {
    pub piece_slot: usize,
    pub from_code: i32,
    pub to_code: i32,
    pub kind: MoveKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_player: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_piece_slot: Option<usize>,
}

impl From<&Move> for WireMove {
    fn from(mv: &Move) -> Self {
        Self {
            piece_slot: mv.piece,
            from_code: mv.from.code(),
            to_code: mv.to.code(),
            kind: mv.kind,
            captured_player: mv.capture.as_ref().map(|c| c.player.clone()),
            captured_piece_slot: mv.capture.as_ref().map(|c| c.piece),
        }
    }
}

impl WireMove {
    /// Decode a move submitted by `player`.
    pub fn into_move(self, player: &PlayerId) -> Result<Move, WireError> {
        let decode = |code: i32| {
            PieceState::from_code(code).ok_or_else(|| WireError::InvalidPositionCode {
                player: player.clone(),
                code,
            })
        };

        let capture = match (self.captured_player, self.captured_piece_slot) {
            (Some(player), Some(piece)) => Some(Capture { player, piece }),
            (None, None) => None,
            _ => {
                return Err(RuleError::InvalidState {
                    reason: "capture needs both player and piece slot",
                }
                .into())
            }
        };

        Ok(Move {
            piece: self.piece_slot,
            from: decode(self.from_code)?,
            to: decode(self.to_code)?,
            kind: self.kind,
            capture,
        })
    }
}

/// Serialize a state as `WireState` JSON.
pub fn state_to_json(state: &GameState) -> Result<String, WireError> {
    Ok(serde_json::to_string(&WireState::from(state))?)
}

/// Parse and validate `WireState` JSON.
pub fn state_from_json(json: &str) -> Result<GameState, WireError> {
    let wire: WireState = serde_json::from_str(json)?;
    GameState::try_from(wire)
}
