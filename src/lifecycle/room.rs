//! In-memory room driver.
//!
//! `Room` is the smallest synchronization collaborator the engine needs:
//! it holds the authoritative state for one match, checks turn ownership,
//! and applies one transition at a time. Each request computes a successor
//! state first and only swaps it in on success, so a rejected request never
//! leaves a trace.
//!
//! ```
//! use ludo_engine::lifecycle::Room;
//! use ludo_engine::core::{GameRng, PlayerId};
//!
//! let mut room = Room::with_rng("ABCD", GameRng::new(42));
//! room.join(PlayerId::new("a"), "Alice").unwrap();
//! room.join(PlayerId::new("b"), "Bob").unwrap();
//! room.start().unwrap();
//!
//! let first = room.state().unwrap().current_player().unwrap().clone();
//! let die = room.roll(&first).unwrap();
//! assert!((1..=6).contains(&die));
//! ```

use tracing::warn;

use super::setup::{draw_die, start_match};
use crate::core::action::Move;
use crate::core::error::RuleError;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::{GameState, MatchStatus};
use crate::rules::{Ludo, RulesEngine};

/// A registered participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomMember {
    pub id: PlayerId,
    pub name: String,
}

/// One match and its registrations.
#[derive(Clone, Debug)]
pub struct Room<R: RulesEngine = Ludo> {
    code: String,
    members: Vec<RoomMember>,
    state: Option<GameState>,
    rng: GameRng,
    rules: R,
}

impl Room<Ludo> {
    /// Create a room with default rules and an entropy-seeded RNG.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self::with_rules(code, Ludo::default(), GameRng::from_entropy())
    }

    /// Create a room with default rules and a given RNG.
    #[must_use]
    pub fn with_rng(code: impl Into<String>, rng: GameRng) -> Self {
        Self::with_rules(code, Ludo::default(), rng)
    }
}

impl<R: RulesEngine> Room<R> {
    /// Create a room with explicit rules and RNG.
    #[must_use]
    pub fn with_rules(code: impl Into<String>, rules: R, rng: GameRng) -> Self {
        Self {
            code: code.into(),
            members: Vec::new(),
            state: None,
            rng,
            rules,
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Registrations in join order.
    #[must_use]
    pub fn members(&self) -> &[RoomMember] {
        &self.members
    }

    /// The authoritative match state, once started.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.state.as_ref().map_or(MatchStatus::Waiting, GameState::status)
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Register a player, or rename one already registered.
    pub fn join(&mut self, id: PlayerId, name: impl Into<String>) -> Result<(), RuleError> {
        if self.status() == MatchStatus::Playing {
            warn!(room = %self.code, player = %id, "join rejected: match in progress");
            return Err(RuleError::MatchAlreadyStarted);
        }

        let name = name.into();
        match self.members.iter_mut().find(|m| m.id == id) {
            Some(member) => member.name = name,
            None => self.members.push(RoomMember { id, name }),
        }
        Ok(())
    }

    /// Drop a registration. The match state, if any, is left alone.
    pub fn leave(&mut self, id: &PlayerId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.id != id);
        self.members.len() != before
    }

    /// Start the match. A match already in progress is left as is.
    pub fn start(&mut self) -> Result<&GameState, RuleError> {
        if self.status() != MatchStatus::Playing {
            let registered: Vec<PlayerId> = self.members.iter().map(|m| m.id.clone()).collect();
            let started = start_match(&registered, &mut self.rng).inspect_err(|err| {
                warn!(room = %self.code, error = %err, "start rejected");
            })?;
            self.state = Some(started);
        }

        self.state
            .as_ref()
            .ok_or(RuleError::MatchNotPlaying {
                status: MatchStatus::Waiting,
            })
    }

    /// Legal moves for a player against the current state.
    #[must_use]
    pub fn legal_moves(&self, player: &PlayerId) -> Vec<Move> {
        self.state
            .as_ref()
            .map(|s| self.rules.legal_moves(s, player))
            .unwrap_or_default()
    }

    /// Roll the die for the player whose turn it is.
    pub fn roll(&mut self, player: &PlayerId) -> Result<u8, RuleError> {
        let state = self.turn_state(player)?.clone();
        let next = draw_die(&state, &mut self.rng).inspect_err(|err| {
            warn!(room = %self.code, player = %player, error = %err, "roll rejected");
        })?;

        let value = next
            .dice()
            .ok_or(RuleError::InvalidState {
                reason: "die missing after roll",
            })?;
        self.state = Some(next);
        Ok(value)
    }

    /// Move one of the current player's pieces with the pending die.
    ///
    /// Returns whether the player keeps the turn.
    pub fn move_piece(&mut self, player: &PlayerId, piece: usize) -> Result<bool, RuleError> {
        let state = self.turn_state(player)?;
        if state.dice().is_none() {
            return Err(self.reject(player, RuleError::invalid("roll first")));
        }

        let Some(mv) = self.rules.move_for_piece(state, player, piece) else {
            return Err(self.reject(player, RuleError::invalid("illegal move")));
        };

        let transition = self
            .rules
            .apply_move(state, player, &mv)
            .map_err(|err| self.reject(player, err))?;
        self.state = Some(transition.state);
        Ok(transition.extra_turn)
    }

    /// Forfeit a die the current player cannot use.
    pub fn pass(&mut self, player: &PlayerId) -> Result<(), RuleError> {
        let state = self.turn_state(player)?;
        let next = self
            .rules
            .pass_turn(state, player)
            .map_err(|err| self.reject(player, err))?;
        self.state = Some(next);
        Ok(())
    }

    /// The current state, if the match is playing and it is `player`'s turn.
    fn turn_state(&self, player: &PlayerId) -> Result<&GameState, RuleError> {
        let state = match &self.state {
            Some(state) if state.status() == MatchStatus::Playing => state,
            other => {
                let status = other.as_ref().map_or(MatchStatus::Waiting, GameState::status);
                return Err(self.reject(player, RuleError::MatchNotPlaying { status }));
            }
        };

        match state.current_player() {
            Some(current) if current == player => Ok(state),
            Some(current) => Err(self.reject(
                player,
                RuleError::NotYourTurn {
                    expected: current.clone(),
                    actual: player.clone(),
                },
            )),
            None => Err(RuleError::InvalidState {
                reason: "turn index out of range",
            }),
        }
    }

    fn reject(&self, player: &PlayerId, err: RuleError) -> RuleError {
        warn!(room = %self.code, player = %player, error = %err, "request rejected");
        err
    }
}
