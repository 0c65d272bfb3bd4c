//! Board drawing geometry.

mod geometry;

pub use geometry::{
    home_lane_grid, ring_grid, yard_grid, BoardGeometry, GridCell, Point, DEFAULT_BOARD_SIZE,
    GRID,
};
