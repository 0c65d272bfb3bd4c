//! Rejections raised by the engine.
//!
//! Every error is reported before any state is replaced: operations take
//! the prior state by reference and only return a successor on success.

use thiserror::Error;

use super::player::{Color, PlayerId};
use super::state::MatchStatus;

/// A rejected transition or malformed input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid transition: {reason}")]
    InvalidTransition { reason: &'static str },

    #[error("not your turn: waiting on {expected}, got {actual}")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },

    #[error("match is {status}, not playing")]
    MatchNotPlaying { status: MatchStatus },

    #[error("match has already started")]
    MatchAlreadyStarted,

    #[error("need 2-4 players, have {count}")]
    InsufficientPlayers { count: usize },

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("player {0} appears more than once")]
    DuplicatePlayer(PlayerId),

    #[error("color {0} assigned more than once")]
    DuplicateColor(Color),

    #[error("die value {0} outside 1..=6")]
    InvalidDieValue(u8),

    #[error("invalid state: {reason}")]
    InvalidState { reason: &'static str },
}

impl RuleError {
    pub(crate) const fn invalid(reason: &'static str) -> Self {
        RuleError::InvalidTransition { reason }
    }
}
