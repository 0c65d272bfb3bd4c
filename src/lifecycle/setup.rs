//! Match construction and die draws.

use tracing::debug;

use crate::core::error::RuleError;
use crate::core::player::{Color, PlayerId};
use crate::core::rng::{DiceSource, GameRng};
use crate::core::state::{GameState, MatchStatus, Seat};

/// Fewest players that can start a match.
pub const MIN_PLAYERS: usize = 2;

/// Most players that can start a match.
pub const MAX_PLAYERS: usize = Color::COUNT;

/// Build a waiting state for a roster; every piece starts in its yard.
pub fn initial_state(players: &[Seat]) -> Result<GameState, RuleError> {
    GameState::new(players)
}

/// First color, in fixed order, not already in use.
#[must_use]
pub fn next_color_for_join(in_use: &[Color]) -> Option<Color> {
    Color::ALL.into_iter().find(|c| !in_use.contains(c))
}

/// Bind colors to players by registration order.
pub fn assign_colors(registered: &[PlayerId]) -> Result<Vec<Seat>, RuleError> {
    let mut seats: Vec<Seat> = Vec::with_capacity(registered.len());

    for id in registered {
        if seats.iter().any(|s| &s.id == id) {
            return Err(RuleError::DuplicatePlayer(id.clone()));
        }
        let in_use: Vec<Color> = seats.iter().map(|s| s.color).collect();
        let color = next_color_for_join(&in_use).ok_or(RuleError::InsufficientPlayers {
            count: registered.len(),
        })?;
        seats.push(Seat::new(id.clone(), color));
    }

    Ok(seats)
}

/// Start a match for 2-4 registered players.
///
/// Colors follow registration order; seating order is then shuffled
/// uniformly, keeping each player's color.
pub fn start_match(registered: &[PlayerId], rng: &mut GameRng) -> Result<GameState, RuleError> {
    let count = registered.len();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        return Err(RuleError::InsufficientPlayers { count });
    }

    let mut seats = assign_colors(registered)?;
    rng.shuffle(&mut seats);

    let state = initial_state(&seats)?.with_status(MatchStatus::Playing);
    debug!(
        players = count,
        first = %seats[0].id,
        "match started"
    );
    Ok(state)
}

/// Draw a die value.
pub fn roll_die(dice: &mut impl DiceSource) -> u8 {
    dice.roll_die()
}

/// Draw the die for the current turn.
///
/// Rejected unless the match is playing and no die is pending.
pub fn draw_die(state: &GameState, dice: &mut impl DiceSource) -> Result<GameState, RuleError> {
    if state.status() != MatchStatus::Playing {
        return Err(RuleError::MatchNotPlaying {
            status: state.status(),
        });
    }
    if state.dice().is_some() {
        return Err(RuleError::invalid("die already rolled this turn"));
    }

    let value = roll_die(dice);
    let mut next = state.clone();
    next.set_dice(value)?;

    debug!(
        player = ?state.current_player().map(PlayerId::as_str),
        die = value,
        "die rolled"
    );
    Ok(next)
}
