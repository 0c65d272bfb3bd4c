//! Board layout.
//!
//! The board is a 15x15 grid with a cross-shaped track. Red's quarter of the
//! ring (13 cells, starting at red's entry cell) is laid out by hand; every
//! other color's quarter, home lane, and yard is red's rotated a quarter
//! turn clockwise per seat. Ring index `k` therefore lands in quarter
//! `k / 13`, matching the entry offsets in `core::track`.
//!
//! Geometry carries no rules. It only tells a renderer where to draw.

use serde::{Deserialize, Serialize};

use crate::core::piece::{PieceState, PIECES_PER_PLAYER};
use crate::core::player::{Color, ColorMap};
use crate::core::track::{ring_index_to_absolute, HOME_LANE_LEN, RING_LEN};

/// Cells per board side.
pub const GRID: u8 = 15;

/// Default board edge length, in drawing units.
pub const DEFAULT_BOARD_SIZE: f64 = 600.0;

const QUARTER_LEN: usize = RING_LEN as usize / Color::COUNT;
const LANE_LEN: usize = HOME_LANE_LEN as usize;

/// Red's quarter of the ring, starting at red's entry cell.
const RED_QUARTER: [GridCell; QUARTER_LEN] = [
    GridCell::new(1, 6),
    GridCell::new(2, 6),
    GridCell::new(3, 6),
    GridCell::new(4, 6),
    GridCell::new(5, 6),
    GridCell::new(6, 5),
    GridCell::new(6, 4),
    GridCell::new(6, 3),
    GridCell::new(6, 2),
    GridCell::new(6, 1),
    GridCell::new(6, 0),
    GridCell::new(7, 0),
    GridCell::new(8, 0),
];

const RED_LANE: [GridCell; LANE_LEN] = [
    GridCell::new(1, 7),
    GridCell::new(2, 7),
    GridCell::new(3, 7),
    GridCell::new(4, 7),
    GridCell::new(5, 7),
    GridCell::new(6, 7),
];

const RED_YARD: [GridCell; PIECES_PER_PLAYER] = [
    GridCell::new(2, 2),
    GridCell::new(4, 2),
    GridCell::new(2, 4),
    GridCell::new(4, 4),
];

/// A grid cell (column, row), origin top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub col: u8,
    pub row: u8,
}

impl GridCell {
    #[must_use]
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Rotate a quarter turn clockwise about the board center.
    #[must_use]
    pub const fn rotate(self) -> Self {
        Self {
            col: GRID - 1 - self.row,
            row: self.col,
        }
    }

    /// Rotate `quarters` quarter turns clockwise.
    #[must_use]
    pub fn rotated(self, quarters: usize) -> Self {
        (0..quarters % 4).fold(self, |cell, _| cell.rotate())
    }

    /// Chebyshev distance between cells.
    #[must_use]
    pub fn distance(self, other: Self) -> u8 {
        self.col.abs_diff(other.col).max(self.row.abs_diff(other.row))
    }
}

/// Drawing position of a cell: center and radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Grid cells of the whole ring, indexed by absolute ring index.
#[must_use]
pub fn ring_grid() -> Vec<GridCell> {
    Color::ALL
        .into_iter()
        .flat_map(|color| RED_QUARTER.map(|cell| cell.rotated(color.index())))
        .collect()
}

/// Grid cells of a color's home lane, from its entry to the finish.
#[must_use]
pub fn home_lane_grid(color: Color) -> [GridCell; LANE_LEN] {
    RED_LANE.map(|cell| cell.rotated(color.index()))
}

/// Grid cells of a color's yard slots.
#[must_use]
pub fn yard_grid(color: Color) -> [GridCell; PIECES_PER_PLAYER] {
    RED_YARD.map(|cell| cell.rotated(color.index()))
}

/// Drawing layout for a square board.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardGeometry {
    /// Edge length of one grid cell.
    pub cell_size: f64,
    /// Ring cells by absolute index (52).
    pub ring: Vec<Point>,
    /// Home lane cells per color (6 each).
    pub home_lanes: ColorMap<[Point; LANE_LEN]>,
    /// Yard slots per color (4 each).
    pub yards: ColorMap<[Point; PIECES_PER_PLAYER]>,
    /// Each color's entry cell on the ring.
    pub start_cells: ColorMap<Point>,
}

impl BoardGeometry {
    /// Lay out a board `size` units on a side.
    #[must_use]
    pub fn new(size: f64) -> Self {
        let cell_size = size / f64::from(GRID);
        let point = |cell: GridCell| Point {
            x: f64::from(cell.col) * cell_size + cell_size * 0.5,
            y: f64::from(cell.row) * cell_size + cell_size * 0.5,
            r: cell_size * 0.38,
        };

        let ring: Vec<Point> = ring_grid().into_iter().map(point).collect();
        let start_cells = ColorMap::new(|color| point(RED_QUARTER[0].rotated(color.index())));

        Self {
            cell_size,
            ring,
            home_lanes: ColorMap::new(|color| home_lane_grid(color).map(point)),
            yards: ColorMap::new(|color| yard_grid(color).map(point)),
            start_cells,
        }
    }

    /// Where a piece is drawn.
    ///
    /// Yard pieces sit in their own slot; finished pieces sit on the last
    /// lane cell. Returns `None` for an out-of-range slot or position.
    #[must_use]
    pub fn locate(&self, color: Color, slot: usize, piece: PieceState) -> Option<Point> {
        match piece {
            PieceState::InYard => self.yards[color].get(slot).copied(),
            PieceState::OnRing(offset) if offset < RING_LEN => self
                .ring
                .get(ring_index_to_absolute(color, offset) as usize)
                .copied(),
            PieceState::InHomeLane(offset) => self.home_lanes[color].get(offset as usize).copied(),
            PieceState::Finished => self.home_lanes[color].last().copied(),
            PieceState::OnRing(_) => None,
        }
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}
