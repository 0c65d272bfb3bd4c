//! Move descriptors and turn history records.
//!
//! A `Move` is produced by legal-move enumeration and handed back unchanged
//! to move application. It carries everything needed to apply it, including
//! the piece it captures, so application never re-derives board occupancy.

use serde::{Deserialize, Serialize};

use super::piece::PieceState;
use super::player::PlayerId;

/// What kind of step a move is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Leave the yard onto the entry cell.
    Enter,
    /// Advance along the ring.
    Move,
    /// Step into (or along) the home lane, possibly finishing.
    Home,
}

impl MoveKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MoveKind::Enter => "enter",
            MoveKind::Move => "move",
            MoveKind::Home => "home",
        }
    }
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An opposing piece sent back to its yard by a move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub player: PlayerId,
    pub piece: usize,
}

/// A legal move for one piece.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Move, MoveKind, PieceState};
///
/// let enter = Move::new(0, PieceState::InYard, PieceState::OnRing(0), MoveKind::Enter);
/// assert!(enter.capture.is_none());
/// assert_eq!(enter.to.code(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Piece slot (0..4).
    pub piece: usize,
    pub from: PieceState,
    pub to: PieceState,
    pub kind: MoveKind,
    pub capture: Option<Capture>,
}

impl Move {
    /// Create a move with no capture.
    #[must_use]
    pub fn new(piece: usize, from: PieceState, to: PieceState, kind: MoveKind) -> Self {
        Self {
            piece,
            from,
            to,
            kind,
            capture: None,
        }
    }

    /// Attach a capture.
    #[must_use]
    pub fn capturing(mut self, player: PlayerId, piece: usize) -> Self {
        self.capture = Some(Capture { player, piece });
        self
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

/// What a player did with a rolled die.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    Moved(Move),
    /// No legal move existed; the die was forfeited.
    Passed,
}

/// One accepted transition in a match's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player: PlayerId,
    pub die: u8,
    pub action: TurnAction,
}

impl TurnRecord {
    #[must_use]
    pub fn new(player: PlayerId, die: u8, action: TurnAction) -> Self {
        Self { player, die, action }
    }
}
