//! Rules engine trait.
//!
//! Implementations define:
//! - What moves are legal for the pending die
//! - How a move (or a forfeited die) produces the next state
//! - When the match is over
//!
//! Every operation takes the prior state by reference and returns a new
//! one, so a rejected call never leaves a partially updated state behind.

use crate::core::action::Move;
use crate::core::config::RulesConfig;
use crate::core::error::RuleError;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, MatchStatus, Transition};

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    /// Players in finishing order. The first entry ended the match.
    pub winners: Vec<PlayerId>,
}

impl GameResult {
    /// The player who ended the match.
    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        self.winners.first()
    }

    /// Check if a player finished.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        self.winners.contains(player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: Return empty if no die is pending or nothing can move
/// - `apply_move`: Must reject moves `legal_moves` would not produce
/// - `pass_turn`: Only valid when `legal_moves` is empty
/// - Turn ownership is checked by the caller, not here
pub trait RulesEngine {
    /// Get the table rules.
    fn config(&self) -> &RulesConfig;

    /// Enumerate legal moves for a player, in piece-slot order.
    fn legal_moves(&self, state: &GameState, player: &PlayerId) -> Vec<Move>;

    /// Apply a legal move, producing the successor state.
    fn apply_move(
        &self,
        state: &GameState,
        player: &PlayerId,
        mv: &Move,
    ) -> Result<Transition, RuleError>;

    /// Forfeit a die that has no legal move.
    fn pass_turn(&self, state: &GameState, player: &PlayerId) -> Result<GameState, RuleError>;

    /// Check if the match is over.
    ///
    /// Returns `Some(result)` once the match has finished, `None` otherwise.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        (state.status() == MatchStatus::Finished).then(|| GameResult {
            winners: state.winners().iter().cloned().collect(),
        })
    }

    // === Convenience Methods ===

    /// Check if a player can use the pending die.
    fn has_legal_move(&self, state: &GameState, player: &PlayerId) -> bool {
        !self.legal_moves(state, player).is_empty()
    }

    /// Find the legal move for a given piece slot, if any.
    fn move_for_piece(&self, state: &GameState, player: &PlayerId, piece: usize) -> Option<Move> {
        self.legal_moves(state, player)
            .into_iter()
            .find(|m| m.piece == piece)
    }
}
