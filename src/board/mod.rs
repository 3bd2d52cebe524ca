//! Board representation for five-in-a-row

pub mod bitboard;
pub mod board;


use std::fmt;

use crate::error::EngineError;

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Smallest board the engine accepts (room for exactly one five).
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest board the engine accepts.
pub const MAX_BOARD_SIZE: usize = 19;
/// Cells on the largest board (19x19 = 361)
pub const MAX_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE;

/// Cell states. Black is player one and always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Human-readable color name
    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "Black",
            Stone::White => "White",
            Stone::Empty => "Empty",
        }
    }
}

/// Position on the board.
///
/// A `Pos` carries no board size; bounds are checked by the [`Board`] it is
/// used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Chebyshev (king-move) distance between two cells
    #[inline]
    pub fn chebyshev(self, other: Pos) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Validated board dimension N (the board is N x N).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSize(u8);

impl BoardSize {
    pub const NINE: BoardSize = BoardSize(9);
    pub const THIRTEEN: BoardSize = BoardSize(13);
    pub const NINETEEN: BoardSize = BoardSize(19);

    /// Validate a board dimension.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            #[allow(clippy::cast_possible_truncation)]
            let n = size as u8;
            Ok(Self(n))
        } else {
            Err(EngineError::UnsupportedBoardSize { size })
        }
    }

    #[inline]
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// Total number of cells
    #[inline]
    pub fn cells(self) -> usize {
        self.get() * self.get()
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = EngineError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}
