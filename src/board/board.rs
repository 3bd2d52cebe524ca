//! N x N board with one bitboard per color

use std::fmt;

use super::bitboard::Bitboard;
use super::{BoardSize, Pos, Stone};
use crate::error::EngineError;

/// Game board.
///
/// Cloning is a full value copy; search code works on its own clone and never
/// holds a reference into the caller's board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: BoardSize,
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    /// Create an empty board of the given dimension.
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Create an empty board, validating the raw dimension.
    pub fn with_size(size: usize) -> Result<Self, EngineError> {
        BoardSize::new(size).map(Self::new)
    }

    /// Board dimension N
    #[inline]
    pub fn size(&self) -> usize {
        self.size.get()
    }

    #[inline]
    pub fn board_size(&self) -> BoardSize {
        self.size
    }

    /// Check if position lies on this board
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        usize::from(pos.row) < self.size() && usize::from(pos.col) < self.size()
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        usize::from(pos.row) * self.size() + usize::from(pos.col)
    }

    #[inline]
    fn pos_at(&self, idx: usize) -> Pos {
        let n = self.size();
        #[allow(clippy::cast_possible_truncation)]
        let pos = Pos::new((idx / n) as u8, (idx % n) as u8);
        pos
    }

    /// Get stone at position. Off-board positions read as `Empty`.
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if !self.contains(pos) {
            return Stone::Empty;
        }
        let idx = self.index(pos);
        if self.black.get(idx) {
            Stone::Black
        } else if self.white.get(idx) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Signed-coordinate lookup used by line walks; `None` means off-board.
    #[inline]
    pub fn cell(&self, row: i32, col: i32) -> Option<Stone> {
        let n = self.size() as i32;
        if row < 0 || col < 0 || row >= n || col >= n {
            return None;
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let pos = Pos::new(row as u8, col as u8);
        Some(self.get(pos))
    }

    /// Check if position is on the board and empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.contains(pos) && self.get(pos) == Stone::Empty
    }

    /// Place a stone without validation. Used by search for place/revert.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        debug_assert!(self.contains(pos));
        let idx = self.index(pos);
        match stone {
            Stone::Black => self.black.set(idx),
            Stone::White => self.white.set(idx),
            Stone::Empty => {}
        }
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        let idx = self.index(pos);
        self.black.clear(idx);
        self.white.clear(idx);
    }

    /// Validated placement for game moves.
    ///
    /// # Errors
    /// `PreconditionViolation` if the position is off-board, occupied, or the
    /// stone is `Empty`.
    pub fn try_place(&mut self, pos: Pos, stone: Stone) -> Result<(), EngineError> {
        if stone == Stone::Empty {
            return Err(EngineError::precondition("cannot place an empty stone"));
        }
        if !self.contains(pos) {
            return Err(EngineError::precondition(format!(
                "{pos} is outside the {n}x{n} board",
                n = self.size()
            )));
        }
        if self.get(pos) != Stone::Empty {
            return Err(EngineError::precondition(format!("{pos} is occupied")));
        }
        self.place_stone(pos, stone);
        Ok(())
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.size.cells() - self.stone_count() as usize
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, Stone)> + '_ {
        self.black
            .union(&self.white)
            .iter_ones()
            .map(move |idx| {
                let pos = self.pos_at(idx);
                (pos, self.get(pos))
            })
    }

    /// Copy with every stone's color inverted
    pub fn color_swapped(&self) -> Board {
        Board {
            size: self.size,
            black: self.white,
            white: self.black,
        }
    }

    /// Center cell `((N-1)/2, (N-1)/2)`
    #[inline]
    pub fn center(&self) -> Pos {
        #[allow(clippy::cast_possible_truncation)]
        let c = ((self.size() - 1) / 2) as u8;
        Pos::new(c, c)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        write!(f, "   ")?;
        for col in 0..n {
            write!(f, "{:>2}", col)?;
        }
        writeln!(f)?;
        for row in 0..n {
            write!(f, "{:>2} ", row)?;
            for col in 0..n {
                #[allow(clippy::cast_possible_truncation)]
                let ch = match self.get(Pos::new(row as u8, col as u8)) {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    Stone::Empty => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
