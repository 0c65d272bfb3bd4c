//! The race rules.
//!
//! ## Moves per piece
//!
//! - **Yard**: enters on the entry cell, only with a 6.
//! - **Ring**: advances by the die. Short of a full lap it lands on the
//!   ring, subject to occupancy; a full lap or more turns into the home
//!   lane, where an overflow of exactly 6 finishes the piece.
//! - **Home lane / finished**: terminal, unless `advance_in_home_lane` is
//!   set, in which case lane pieces advance by exact rolls.
//!
//! ## Landing on the ring
//!
//! | Destination | Result |
//! |---|---|
//! | empty, or only the mover's pieces | legal |
//! | safe cell with opponents, `Sanctuary` | legal, no capture |
//! | safe cell with opponents, `Guarded` | illegal |
//! | one opposing piece, not safe | legal, captures it |
//! | anything else | illegal |

use tracing::{debug, info};

use super::engine::RulesEngine;
use crate::core::action::{Move, MoveKind, TurnAction, TurnRecord};
use crate::core::config::{RulesConfig, SafeCellRule};
use crate::core::error::RuleError;
use crate::core::occupancy::{Occupancy, Occupant};
use crate::core::piece::PieceState;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, MatchStatus, Transition};
use crate::core::track::{
    is_safe_cell, ring_index_to_absolute, ENTRY_ROLL, EXTRA_TURN_ROLL, RING_LEN,
};

/// Outcome of landing on a ring cell.
enum Landing<'a> {
    Open,
    Capture(&'a Occupant),
    Blocked,
}

/// Race-game rules.
#[derive(Clone, Debug, Default)]
pub struct Ludo {
    config: RulesConfig,
}

impl Ludo {
    /// Create an engine with the given table rules.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    fn landing<'a>(
        &self,
        occupancy: &'a Occupancy,
        absolute: u8,
        player: &PlayerId,
    ) -> Landing<'a> {
        if occupancy.held_only_by(absolute, player) {
            return Landing::Open;
        }

        if is_safe_cell(absolute) {
            return match self.config.safe_cell_rule {
                SafeCellRule::Sanctuary => Landing::Open,
                SafeCellRule::Guarded => Landing::Blocked,
            };
        }

        match occupancy.at(absolute) {
            [lone] => Landing::Capture(lone),
            _ => Landing::Blocked,
        }
    }

    /// Record the player as a winner once all their pieces are home.
    ///
    /// The first winner ends the match; later finishers are only appended.
    fn settle_finish(state: &mut GameState, player: &PlayerId) {
        if !state.has_finished_all(player) || state.is_winner(player) {
            return;
        }

        state.push_winner(player.clone());
        info!(player = %player, place = state.winners().len(), "player finished");

        if state.status() != MatchStatus::Finished {
            state.set_status(MatchStatus::Finished);
            info!(winner = %player, "match finished");
        }
    }
}

fn ensure_playing(state: &GameState) -> Result<(), RuleError> {
    match state.status() {
        MatchStatus::Playing => Ok(()),
        status => Err(RuleError::MatchNotPlaying { status }),
    }
}

impl RulesEngine for Ludo {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn legal_moves(&self, state: &GameState, player: &PlayerId) -> Vec<Move> {
        let (Some(die), Some(color), Some(pieces)) =
            (state.dice(), state.color_of(player), state.pieces(player))
        else {
            return vec![];
        };

        let occupancy = Occupancy::from_state(state);
        let mut moves = Vec::new();

        for (slot, &piece) in pieces.iter().enumerate() {
            match piece {
                PieceState::InYard => {
                    if die == ENTRY_ROLL {
                        moves.push(Move::new(slot, piece, PieceState::OnRing(0), MoveKind::Enter));
                    }
                }
                PieceState::OnRing(offset) => {
                    let Some(target) = offset.checked_add(die) else {
                        continue;
                    };

                    if target < RING_LEN {
                        let absolute = ring_index_to_absolute(color, target);
                        let mv = Move::new(slot, piece, PieceState::OnRing(target), MoveKind::Move);

                        match self.landing(&occupancy, absolute, player) {
                            Landing::Open => moves.push(mv),
                            Landing::Capture(victim) => {
                                moves.push(mv.capturing(victim.player.clone(), victim.piece));
                            }
                            Landing::Blocked => {}
                        }
                    } else if let Some(to) = PieceState::from_lane_offset(target - RING_LEN) {
                        moves.push(Move::new(slot, piece, to, MoveKind::Home));
                    }
                }
                PieceState::InHomeLane(offset) if self.config.advance_in_home_lane => {
                    let to = offset
                        .checked_add(die)
                        .and_then(PieceState::from_lane_offset);
                    if let Some(to) = to {
                        moves.push(Move::new(slot, piece, to, MoveKind::Home));
                    }
                }
                PieceState::InHomeLane(_) | PieceState::Finished => {}
            }
        }

        moves
    }

    fn apply_move(
        &self,
        state: &GameState,
        player: &PlayerId,
        mv: &Move,
    ) -> Result<Transition, RuleError> {
        ensure_playing(state)?;
        let die = state
            .dice()
            .ok_or(RuleError::invalid("no die rolled this turn"))?;
        if state.color_of(player).is_none() {
            return Err(RuleError::UnknownPlayer(player.clone()));
        }
        if !self.legal_moves(state, player).contains(mv) {
            return Err(RuleError::invalid("move is not legal"));
        }

        let mut next = state.clone();
        next.set_piece(player, mv.piece, mv.to)?;

        if let Some(capture) = &mv.capture {
            next.set_piece(&capture.player, capture.piece, PieceState::InYard)?;
            debug!(
                player = %player,
                victim = %capture.player,
                victim_piece = capture.piece,
                "piece captured"
            );
        }

        next.record(TurnRecord::new(player.clone(), die, TurnAction::Moved(mv.clone())));
        Self::settle_finish(&mut next, player);

        let extra_turn = die == EXTRA_TURN_ROLL;
        next.clear_dice();
        if !extra_turn {
            next.advance_turn();
        }

        debug!(
            player = %player,
            die,
            piece = mv.piece,
            kind = %mv.kind,
            to = mv.to.code(),
            extra_turn,
            "move applied"
        );

        Ok(Transition {
            state: next,
            extra_turn,
        })
    }

    fn pass_turn(&self, state: &GameState, player: &PlayerId) -> Result<GameState, RuleError> {
        ensure_playing(state)?;
        let die = state
            .dice()
            .ok_or(RuleError::invalid("no die rolled this turn"))?;
        if state.color_of(player).is_none() {
            return Err(RuleError::UnknownPlayer(player.clone()));
        }
        if self.has_legal_move(state, player) {
            return Err(RuleError::invalid("a legal move is available"));
        }

        let mut next = state.clone();
        next.record(TurnRecord::new(player.clone(), die, TurnAction::Passed));
        Self::settle_finish(&mut next, player);
        next.clear_dice();
        next.advance_turn();

        debug!(player = %player, die, "turn passed");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::Color;
    use crate::core::state::Seat;

    fn pid(id: &str) -> PlayerId {
        PlayerId::new(id)
    }

    /// P1..P4 seated red, blue, yellow, green; match playing.
    fn four_players() -> GameState {
        GameState::new(&[
            Seat::new("P1", Color::Red),
            Seat::new("P2", Color::Blue),
            Seat::new("P3", Color::Yellow),
            Seat::new("P4", Color::Green),
        ])
        .unwrap()
        .with_status(MatchStatus::Playing)
    }

    #[test]
    fn test_no_die_no_moves() {
        let state = four_players();
        assert!(Ludo::default().legal_moves(&state, &pid("P1")).is_empty());
    }

    #[test]
    fn test_unknown_player_has_no_moves() {
        let state = four_players().with_dice(6).unwrap();
        assert!(Ludo::default().legal_moves(&state, &pid("nobody")).is_empty());
    }

    #[test]
    fn test_enter_requires_six() {
        let rules = Ludo::default();

        for die in 1..=5 {
            let state = four_players().with_dice(die).unwrap();
            assert!(rules.legal_moves(&state, &pid("P1")).is_empty());
        }

        let state = four_players().with_dice(6).unwrap();
        let moves = rules.legal_moves(&state, &pid("P1"));
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.kind == MoveKind::Enter));
        assert_eq!(
            moves.iter().map(|m| m.piece).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_enter_applies_with_extra_turn() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let state = four_players()
            .with_piece(&p1, 1, PieceState::OnRing(20))
            .unwrap()
            .with_piece(&p1, 2, PieceState::Finished)
            .unwrap()
            .with_piece(&p1, 3, PieceState::Finished)
            .unwrap()
            .with_dice(6)
            .unwrap();

        let moves = rules.legal_moves(&state, &p1);
        let enter = moves.iter().find(|m| m.kind == MoveKind::Enter).unwrap();
        assert_eq!(enter.piece, 0);

        let t = rules.apply_move(&state, &p1, enter).unwrap();
        assert!(t.extra_turn);
        assert_eq!(t.state.piece(&p1, 0), Some(PieceState::OnRing(0)));
        assert_eq!(t.state.turn_index(), 0);
        assert_eq!(t.state.dice(), None);
    }

    #[test]
    fn test_home_entry_overflow() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let state = four_players()
            .with_piece(&p1, 0, PieceState::OnRing(50))
            .unwrap()
            .with_dice(3)
            .unwrap();

        let moves = rules.legal_moves(&state, &p1);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].kind, MoveKind::Home);
        assert_eq!(moves[0].to.code(), 101);

        let t = rules.apply_move(&state, &p1, &moves[0]).unwrap();
        assert_eq!(t.state.piece(&p1, 0), Some(PieceState::InHomeLane(1)));
        assert!(!t.extra_turn);
        assert_eq!(t.state.turn_index(), 1);
    }

    #[test]
    fn test_home_lane_pieces_are_terminal_by_default() {
        let p1 = pid("P1");
        let state = four_players()
            .with_piece(&p1, 0, PieceState::InHomeLane(2))
            .unwrap()
            .with_dice(4)
            .unwrap();

        assert!(Ludo::default().legal_moves(&state, &p1).is_empty());
    }

    #[test]
    fn test_home_lane_advance_when_enabled() {
        let rules = Ludo::new(RulesConfig::default().with_home_lane_advance());
        let p1 = pid("P1");
        let base = four_players()
            .with_piece(&p1, 0, PieceState::InHomeLane(2))
            .unwrap();

        let moves = rules.legal_moves(&base.clone().with_dice(4).unwrap(), &p1);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, PieceState::Finished);

        let moves = rules.legal_moves(&base.clone().with_dice(3).unwrap(), &p1);
        assert_eq!(moves[0].to, PieceState::InHomeLane(5));

        // Overshooting the finish is not allowed
        assert!(rules.legal_moves(&base.with_dice(5).unwrap(), &p1).is_empty());
    }

    #[test]
    fn test_capture_on_plain_cell() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let p2 = pid("P2");
        // Blue offset 49 sits on absolute 10
        let state = four_players()
            .with_piece(&p1, 0, PieceState::OnRing(7))
            .unwrap()
            .with_piece(&p2, 2, PieceState::OnRing(49))
            .unwrap()
            .with_dice(3)
            .unwrap();

        let moves = rules.legal_moves(&state, &p1);
        assert_eq!(moves.len(), 1);
        let capture = moves[0].capture.as_ref().unwrap();
        assert_eq!(capture.player, p2);
        assert_eq!(capture.piece, 2);

        let t = rules.apply_move(&state, &p1, &moves[0]).unwrap();
        assert_eq!(t.state.piece(&p1, 0), Some(PieceState::OnRing(10)));
        assert_eq!(t.state.piece(&p2, 2), Some(PieceState::InYard));
    }

    #[test]
    fn test_safe_cell_sanctuary_shares() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let p2 = pid("P2");
        // Absolute 8 is safe; blue offset 47 is absolute 8
        let state = four_players()
            .with_piece(&p1, 0, PieceState::OnRing(5))
            .unwrap()
            .with_piece(&p2, 0, PieceState::OnRing(47))
            .unwrap()
            .with_dice(3)
            .unwrap();

        let moves = rules.legal_moves(&state, &p1);
        assert_eq!(moves.len(), 1);
        assert!(!moves[0].is_capture());

        let t = rules.apply_move(&state, &p1, &moves[0]).unwrap();
        assert_eq!(t.state.piece(&p2, 0), Some(PieceState::OnRing(47)));
    }

    #[test]
    fn test_safe_cell_guarded_blocks() {
        let rules = Ludo::new(RulesConfig::default().with_safe_cell_rule(SafeCellRule::Guarded));
        let p1 = pid("P1");
        let p2 = pid("P2");
        let state = four_players()
            .with_piece(&p1, 0, PieceState::OnRing(5))
            .unwrap()
            .with_piece(&p2, 0, PieceState::OnRing(47))
            .unwrap()
            .with_dice(3)
            .unwrap();

        assert!(rules.legal_moves(&state, &p1).is_empty());
    }

    #[test]
    fn test_blockade_of_two_opponents() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let p2 = pid("P2");
        let state = four_players()
            .with_piece(&p1, 0, PieceState::OnRing(7))
            .unwrap()
            .with_piece(&p2, 0, PieceState::OnRing(49))
            .unwrap()
            .with_piece(&p2, 1, PieceState::OnRing(49))
            .unwrap()
            .with_dice(3)
            .unwrap();

        assert!(rules.legal_moves(&state, &p1).is_empty());
    }

    #[test]
    fn test_mixed_cell_blocks() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let p2 = pid("P2");
        let state = four_players()
            .with_piece(&p1, 0, PieceState::OnRing(7))
            .unwrap()
            .with_piece(&p1, 1, PieceState::OnRing(10))
            .unwrap()
            .with_piece(&p2, 0, PieceState::OnRing(49))
            .unwrap()
            .with_dice(3)
            .unwrap();

        let moves = rules.legal_moves(&state, &p1);
        assert!(moves.iter().all(|m| m.piece != 0));
    }

    #[test]
    fn test_own_stack_is_open() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let state = four_players()
            .with_piece(&p1, 0, PieceState::OnRing(7))
            .unwrap()
            .with_piece(&p1, 1, PieceState::OnRing(10))
            .unwrap()
            .with_piece(&p1, 2, PieceState::OnRing(10))
            .unwrap()
            .with_dice(3)
            .unwrap();

        let moves = rules.legal_moves(&state, &p1);
        let first = moves.iter().find(|m| m.piece == 0).unwrap();
        assert!(!first.is_capture());
        assert_eq!(first.to, PieceState::OnRing(10));
    }

    #[test]
    fn test_turn_advances_without_six() {
        let rules = Ludo::default();
        let p4 = pid("P4");
        let state = four_players()
            .with_turn_index(3)
            .unwrap()
            .with_piece(&p4, 0, PieceState::OnRing(0))
            .unwrap()
            .with_dice(2)
            .unwrap();

        let mv = rules.move_for_piece(&state, &p4, 0).unwrap();
        let t = rules.apply_move(&state, &p4, &mv).unwrap();
        assert!(!t.extra_turn);
        assert_eq!(t.state.turn_index(), 0);
        assert_eq!(t.state.dice(), None);
    }

    #[test]
    fn test_six_grants_extra_turn_on_any_move() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let state = four_players()
            .with_piece(&p1, 0, PieceState::OnRing(48))
            .unwrap()
            .with_piece(&p1, 1, PieceState::Finished)
            .unwrap()
            .with_piece(&p1, 2, PieceState::Finished)
            .unwrap()
            .with_piece(&p1, 3, PieceState::Finished)
            .unwrap()
            .with_dice(6)
            .unwrap();

        let moves = rules.legal_moves(&state, &p1);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].kind, MoveKind::Home);

        let t = rules.apply_move(&state, &p1, &moves[0]).unwrap();
        assert!(t.extra_turn);
        assert_eq!(t.state.turn_index(), 0);
    }

    #[test]
    fn test_apply_rejects_foreign_move() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let state = four_players().with_dice(3).unwrap();
        let bogus = Move::new(0, PieceState::InYard, PieceState::OnRing(0), MoveKind::Enter);

        assert_eq!(
            rules.apply_move(&state, &p1, &bogus),
            Err(RuleError::InvalidTransition {
                reason: "move is not legal"
            })
        );
    }

    #[test]
    fn test_apply_requires_playing() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let state = four_players()
            .with_status(MatchStatus::Waiting)
            .with_dice(6)
            .unwrap();
        let enter = Move::new(0, PieceState::InYard, PieceState::OnRing(0), MoveKind::Enter);

        assert_eq!(
            rules.apply_move(&state, &p1, &enter),
            Err(RuleError::MatchNotPlaying {
                status: MatchStatus::Waiting
            })
        );
    }

    #[test]
    fn test_apply_does_not_touch_input() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let state = four_players().with_dice(6).unwrap();
        let before = state.clone();

        let mv = rules.move_for_piece(&state, &p1, 0).unwrap();
        let t = rules.apply_move(&state, &p1, &mv).unwrap();

        assert_eq!(state, before);
        assert_ne!(t.state, before);
    }

    #[test]
    fn test_pass_only_without_moves() {
        let rules = Ludo::default();
        let p1 = pid("P1");

        let stuck = four_players().with_dice(3).unwrap();
        let next = rules.pass_turn(&stuck, &p1).unwrap();
        assert_eq!(next.turn_index(), 1);
        assert_eq!(next.dice(), None);
        assert_eq!(next.history().len(), 1);
        assert_eq!(next.history()[0].action, TurnAction::Passed);

        let can_move = four_players().with_dice(6).unwrap();
        assert!(rules.pass_turn(&can_move, &p1).is_err());

        let unrolled = four_players();
        assert!(rules.pass_turn(&unrolled, &p1).is_err());
    }

    #[test]
    fn test_pass_after_six_still_rotates() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let state = four_players()
            .with_piece(&p1, 0, PieceState::InHomeLane(0))
            .unwrap()
            .with_piece(&p1, 1, PieceState::InHomeLane(1))
            .unwrap()
            .with_piece(&p1, 2, PieceState::InHomeLane(2))
            .unwrap()
            .with_piece(&p1, 3, PieceState::InHomeLane(3))
            .unwrap()
            .with_dice(6)
            .unwrap();

        let next = rules.pass_turn(&state, &p1).unwrap();
        assert_eq!(next.turn_index(), 1);
    }

    #[test]
    fn test_first_finisher_ends_match() {
        let rules = Ludo::new(RulesConfig::default().with_home_lane_advance());
        let p1 = pid("P1");
        let state = four_players()
            .with_piece(&p1, 0, PieceState::InHomeLane(5))
            .unwrap()
            .with_piece(&p1, 1, PieceState::Finished)
            .unwrap()
            .with_piece(&p1, 2, PieceState::Finished)
            .unwrap()
            .with_piece(&p1, 3, PieceState::Finished)
            .unwrap()
            .with_dice(1)
            .unwrap();

        let mv = rules.move_for_piece(&state, &p1, 0).unwrap();
        let t = rules.apply_move(&state, &p1, &mv).unwrap();

        assert_eq!(t.state.status(), MatchStatus::Finished);
        assert_eq!(t.state.winners().iter().collect::<Vec<_>>(), vec![&p1]);

        let result = rules.is_terminal(&t.state).unwrap();
        assert_eq!(result.winner(), Some(&p1));
        assert!(rules.is_terminal(&state).is_none());
    }

    #[test]
    fn test_all_finished_player_recorded_on_pass() {
        let rules = Ludo::default();
        let p1 = pid("P1");
        let mut state = four_players();
        for slot in 0..4 {
            state = state.with_piece(&p1, slot, PieceState::Finished).unwrap();
        }
        let state = state.with_dice(2).unwrap();

        let next = rules.pass_turn(&state, &p1).unwrap();
        assert!(next.is_winner(&p1));
        assert_eq!(next.status(), MatchStatus::Finished);
    }

    #[test]
    fn test_later_finisher_keeps_status() {
        let p1 = pid("P1");
        let p2 = pid("P2");
        let mut state = four_players();
        for slot in 0..4 {
            state = state
                .with_piece(&p1, slot, PieceState::Finished)
                .unwrap()
                .with_piece(&p2, slot, PieceState::Finished)
                .unwrap();
        }

        Ludo::settle_finish(&mut state, &p1);
        Ludo::settle_finish(&mut state, &p2);
        Ludo::settle_finish(&mut state, &p2);

        assert_eq!(state.status(), MatchStatus::Finished);
        assert_eq!(state.winners().iter().collect::<Vec<_>>(), vec![&p1, &p2]);
    }
}
