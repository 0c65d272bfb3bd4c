//! Match lifecycle: roster setup, color assignment, seating, die draws,
//! and an in-memory room that drives a match one request at a time.

mod room;
mod setup;

pub use room::{Room, RoomMember};
pub use setup::{
    assign_colors, draw_die, initial_state, next_color_for_join, roll_die, start_match,
    MAX_PLAYERS, MIN_PLAYERS,
};
