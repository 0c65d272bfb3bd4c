//! Match state.
//!
//! ## GameState
//!
//! The single value describing a match: roster and seat colors, whose turn
//! it is, the pending die, every piece's position, and the finishing order.
//!
//! States are values. Rules operations take `&GameState` and return a new
//! state; the input is never modified. Collections use `im` persistent
//! structures so producing a successor shares everything it did not change.
//!
//! ## Invariants
//!
//! - `order` is non-empty and has no duplicates
//! - `colors` and `positions` have exactly one entry per player in `order`
//! - no color is assigned twice
//! - `turn_index < order.len()`
//! - `dice`, when set, is in `1..=6`
//! - every player in `winners` is in `order`, appears once, and has all
//!   pieces finished
//! - a `Finished` match has at least one winner

use im::{OrdMap, Vector};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::action::TurnRecord;
use super::error::RuleError;
use super::piece::{PieceState, PIECES_PER_PLAYER};
use super::player::{Color, PlayerId};

/// Match lifecycle status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Waiting,
    Playing,
    Finished,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MatchStatus::Waiting => "waiting",
            MatchStatus::Playing => "playing",
            MatchStatus::Finished => "finished",
        })
    }
}

/// A registered player and their bound color.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub id: PlayerId,
    pub color: Color,
}

impl Seat {
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, color: Color) -> Self {
        Self { id: id.into(), color }
    }
}

/// Result of applying a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// The successor state.
    pub state: GameState,
    /// The mover keeps the turn (the die showed 6).
    pub extra_turn: bool,
}

/// Pieces of one player, indexed by slot.
pub type Pieces = [PieceState; PIECES_PER_PLAYER];

/// Complete match state.
///
/// Deserializing runs `validate`, so a decoded state always holds the
/// invariants above.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    pub(crate) status: MatchStatus,
    pub(crate) order: Vector<PlayerId>,
    pub(crate) colors: OrdMap<PlayerId, Color>,
    pub(crate) turn_index: usize,
    pub(crate) dice: Option<u8>,
    pub(crate) positions: OrdMap<PlayerId, Pieces>,
    pub(crate) winners: Vector<PlayerId>,
    pub(crate) history: Vector<TurnRecord>,
}

/// Unchecked serde shape of `GameState`.
#[derive(Deserialize)]
struct RawGameState {
    status: MatchStatus,
    order: Vector<PlayerId>,
    colors: OrdMap<PlayerId, Color>,
    turn_index: usize,
    dice: Option<u8>,
    positions: OrdMap<PlayerId, Pieces>,
    winners: Vector<PlayerId>,
    history: Vector<TurnRecord>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = RuleError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let state = Self {
            status: raw.status,
            order: raw.order,
            colors: raw.colors,
            turn_index: raw.turn_index,
            dice: raw.dice,
            positions: raw.positions,
            winners: raw.winners,
            history: raw.history,
        };
        state.validate()?;
        Ok(state)
    }
}

impl GameState {
    /// Build a waiting state with every piece in its yard.
    ///
    /// Seats keep the given order; the first seat moves first.
    pub fn new(seats: &[Seat]) -> Result<Self, RuleError> {
        if seats.is_empty() {
            return Err(RuleError::InsufficientPlayers { count: 0 });
        }

        let state = Self {
            status: MatchStatus::Waiting,
            order: seats.iter().map(|s| s.id.clone()).collect(),
            colors: seats.iter().map(|s| (s.id.clone(), s.color)).collect(),
            turn_index: 0,
            dice: None,
            positions: seats
                .iter()
                .map(|s| (s.id.clone(), [PieceState::InYard; PIECES_PER_PLAYER]))
                .collect(),
            winners: Vector::new(),
            history: Vector::new(),
        };
        state.validate()?;
        Ok(state)
    }

    // === Queries ===

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Turn rotation order.
    #[must_use]
    pub fn order(&self) -> &Vector<PlayerId> {
        &self.order
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&PlayerId> {
        self.order.get(self.turn_index)
    }

    /// The pending die value, if rolled this turn.
    #[must_use]
    pub fn dice(&self) -> Option<u8> {
        self.dice
    }

    #[must_use]
    pub fn color_of(&self, player: &PlayerId) -> Option<Color> {
        self.colors.get(player).copied()
    }

    #[must_use]
    pub fn pieces(&self, player: &PlayerId) -> Option<&Pieces> {
        self.positions.get(player)
    }

    #[must_use]
    pub fn piece(&self, player: &PlayerId, slot: usize) -> Option<PieceState> {
        self.positions.get(player).and_then(|p| p.get(slot).copied())
    }

    /// Seats in turn order.
    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.order.iter().filter_map(move |id| {
            self.color_of(id).map(|color| Seat {
                id: id.clone(),
                color,
            })
        })
    }

    /// Finishing order.
    #[must_use]
    pub fn winners(&self) -> &Vector<PlayerId> {
        &self.winners
    }

    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        self.winners.contains(player)
    }

    /// Check whether all of a player's pieces are finished.
    #[must_use]
    pub fn has_finished_all(&self, player: &PlayerId) -> bool {
        self.pieces(player)
            .is_some_and(|pieces| pieces.iter().all(|p| p.is_finished()))
    }

    /// Accepted moves and passes, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    // === Construction helpers ===

    /// Replace the status.
    #[must_use]
    pub fn with_status(mut self, status: MatchStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the pending die.
    pub fn with_dice(mut self, value: u8) -> Result<Self, RuleError> {
        self.set_dice(value)?;
        Ok(self)
    }

    /// Clear the pending die.
    #[must_use]
    pub fn without_dice(mut self) -> Self {
        self.dice = None;
        self
    }

    /// Place one piece.
    pub fn with_piece(
        mut self,
        player: &PlayerId,
        slot: usize,
        piece: PieceState,
    ) -> Result<Self, RuleError> {
        if !piece.is_valid() {
            return Err(RuleError::InvalidState {
                reason: "piece position out of range",
            });
        }
        self.set_piece(player, slot, piece)?;
        Ok(self)
    }

    /// Point the turn at another seat.
    pub fn with_turn_index(mut self, turn_index: usize) -> Result<Self, RuleError> {
        if turn_index >= self.order.len() {
            return Err(RuleError::InvalidState {
                reason: "turn index out of range",
            });
        }
        self.turn_index = turn_index;
        Ok(self)
    }

    // === Crate-internal mutation on owned successors ===

    pub(crate) fn set_dice(&mut self, value: u8) -> Result<(), RuleError> {
        if !(1..=6).contains(&value) {
            return Err(RuleError::InvalidDieValue(value));
        }
        self.dice = Some(value);
        Ok(())
    }

    pub(crate) fn clear_dice(&mut self) {
        self.dice = None;
    }

    pub(crate) fn set_piece(
        &mut self,
        player: &PlayerId,
        slot: usize,
        piece: PieceState,
    ) -> Result<(), RuleError> {
        let pieces = self
            .positions
            .get_mut(player)
            .ok_or_else(|| RuleError::UnknownPlayer(player.clone()))?;
        let target = pieces.get_mut(slot).ok_or(RuleError::InvalidState {
            reason: "piece slot out of range",
        })?;
        *target = piece;
        Ok(())
    }

    /// Pass the turn to the next seat.
    pub(crate) fn advance_turn(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.turn_index = (self.turn_index + 1) % self.order.len();
    }

    pub(crate) fn set_status(&mut self, status: MatchStatus) {
        self.status = status;
    }

    pub(crate) fn push_winner(&mut self, player: PlayerId) {
        self.winners.push_back(player);
    }

    pub(crate) fn record(&mut self, record: TurnRecord) {
        self.history.push_back(record);
    }

    // === Validation ===

    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.order.is_empty() {
            return Err(RuleError::InsufficientPlayers { count: 0 });
        }

        let mut seen = FxHashSet::default();
        for id in &self.order {
            if !seen.insert(id) {
                return Err(RuleError::DuplicatePlayer(id.clone()));
            }
        }

        if self.turn_index >= self.order.len() {
            return Err(RuleError::InvalidState {
                reason: "turn index out of range",
            });
        }

        if self.colors.len() != self.order.len() || self.positions.len() != self.order.len() {
            return Err(RuleError::InvalidState {
                reason: "colors and positions must cover exactly the roster",
            });
        }

        let mut used = FxHashSet::default();
        for id in &self.order {
            let color = self
                .colors
                .get(id)
                .ok_or_else(|| RuleError::UnknownPlayer(id.clone()))?;
            if !used.insert(*color) {
                return Err(RuleError::DuplicateColor(*color));
            }

            let pieces = self
                .positions
                .get(id)
                .ok_or_else(|| RuleError::UnknownPlayer(id.clone()))?;
            if !pieces.iter().all(|p| p.is_valid()) {
                return Err(RuleError::InvalidState {
                    reason: "piece position out of range",
                });
            }
        }

        if let Some(value) = self.dice {
            if !(1..=6).contains(&value) {
                return Err(RuleError::InvalidDieValue(value));
            }
        }

        let mut finished = FxHashSet::default();
        for id in &self.winners {
            if !seen.contains(id) {
                return Err(RuleError::UnknownPlayer(id.clone()));
            }
            if !finished.insert(id) {
                return Err(RuleError::DuplicatePlayer(id.clone()));
            }
            if !self.has_finished_all(id) {
                return Err(RuleError::InvalidState {
                    reason: "winner has unfinished pieces",
                });
            }
        }

        if self.status == MatchStatus::Finished && self.winners.is_empty() {
            return Err(RuleError::InvalidState {
                reason: "finished match without a winner",
            });
        }

        Ok(())
    }
}
