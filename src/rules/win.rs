//! Win and draw detection
//!
//! A game is won by a run of exactly five stones. A run of six or more does
//! not end the game; it only counts as a strong asset in evaluation.

use crate::board::{Board, Pos, Stone};

use super::line::{runs, DIRECTIONS};

/// Length of a winning run
pub const WIN_LENGTH: u8 = 5;

/// Result of checking a board snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    NoResult,
    Win(Stone),
    Draw,
}

impl GameOutcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::NoResult
    }
}

/// Classify a board as won, drawn, or still in play.
///
/// Wins are checked before the full-board draw, so a board filled by a
/// winning move reports the win.
pub fn check_outcome(board: &Board) -> GameOutcome {
    if let Some(run) = runs(board).find(|r| r.length == WIN_LENGTH) {
        return GameOutcome::Win(run.color);
    }
    if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::NoResult
    }
}

/// Would placing `color` at `pos` complete a run of exactly five?
///
/// `pos` is treated as holding `color` regardless of its current content, so
/// this works both before and after a tentative placement.
#[inline]
pub fn completes_five(board: &Board, pos: Pos, color: Stone) -> bool {
    if color == Stone::Empty {
        return false;
    }
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let count = |sign: i32| {
            let mut n = 0;
            let mut r = i32::from(pos.row) + dr * sign;
            let mut c = i32::from(pos.col) + dc * sign;
            while board.cell(r, c) == Some(color) {
                n += 1;
                r += dr * sign;
                c += dc * sign;
            }
            n
        };
        count(-1) + count(1) + 1 == WIN_LENGTH
    })
}

/// The stones of the first exactly-five run, with its color.
pub fn winning_line(board: &Board) -> Option<(Stone, Vec<Pos>)> {
    runs(board)
        .find(|r| r.length == WIN_LENGTH)
        .map(|r| (r.color, r.stones().collect()))
}
