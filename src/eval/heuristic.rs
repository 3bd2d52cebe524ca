//! Heuristic evaluation of board positions
//!
//! One pass over the board's runs builds a [`BlockTally`] per side; each
//! tally is reduced to a ladder score. The pair is returned as
//! `(side, opponent)` so callers decide how to combine them.

use crate::board::{Board, Stone};
use crate::rules::runs;

use super::patterns::{Block, BlockTally, PatternScore};

/// Per-side block tallies, `(black, white)`.
#[must_use]
pub fn tally(board: &Board) -> (BlockTally, BlockTally) {
    let mut black = BlockTally::new();
    let mut white = BlockTally::new();
    for run in runs(board) {
        let Some(block) = Block::classify(run.length, run.walls) else {
            continue;
        };
        match run.color {
            Stone::Black => black.add(block),
            Stone::White => white.add(block),
            Stone::Empty => {}
        }
    }
    (black, white)
}

/// Ladder scores `(side, opponent)` for `side`.
///
/// # Arguments
/// * `board` - The board to score
/// * `side` - The color whose score comes first
///
/// Swapping colors on the board swaps the pair:
/// `evaluate(b, Black) == evaluate(&b.color_swapped(), White)`.
#[must_use]
pub fn evaluate(board: &Board, side: Stone) -> (i32, i32) {
    let (black, white) = tally(board);
    match side {
        Stone::White => (white.score(), black.score()),
        _ => (black.score(), white.score()),
    }
}

/// Collapse a score pair into one value from `side`'s view.
///
/// A near-certain score on either side is returned raw (the side's own
/// threat takes precedence), otherwise the difference.
#[inline]
#[must_use]
pub fn combine(side: i32, opponent: i32) -> i32 {
    if side > PatternScore::NEAR_CERTAIN {
        side
    } else if opponent > PatternScore::NEAR_CERTAIN {
        -opponent
    } else {
        side - opponent
    }
}

/// Combined static score of `board` for `side`.
#[inline]
#[must_use]
pub fn static_score(board: &Board, side: Stone) -> i32 {
    let (mine, theirs) = evaluate(board, side);
    combine(mine, theirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSize, Pos};

    fn board_with(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new(BoardSize::NINE);
        for &(r, c, s) in stones {
            board.place_stone(Pos::new(r, c), s);
        }
        board
    }

    #[test]
    fn test_empty_board() {
        let board = Board::new(BoardSize::NINE);
        assert_eq!(evaluate(&board, Stone::Black), (0, 0));
        assert_eq!(static_score(&board, Stone::White), 0);
    }

    #[test]
    fn test_single_stones_score_nothing() {
        let board = board_with(&[(4, 4, Stone::Black), (0, 0, Stone::White)]);
        assert_eq!(evaluate(&board, Stone::Black), (0, 0));
    }

    #[test]
    fn test_tally_open_three() {
        let board = board_with(&[(4, 3, Stone::Black), (4, 4, Stone::Black), (4, 5, Stone::Black)]);
        let (black, white) = tally(&board);
        assert_eq!(black.get(Block::OpenThree), 1, "one run, counted once");
        assert_eq!(black.get(Block::OpenTwo), 0);
        assert_eq!(white, BlockTally::new());
        assert_eq!(evaluate(&board, Stone::Black), (80, 0));
        assert_eq!(evaluate(&board, Stone::White), (0, 80));
    }

    #[test]
    fn test_walls_from_edge_and_opponent() {
        let board = board_with(&[
            (0, 0, Stone::White),
            (0, 1, Stone::White),
            (0, 2, Stone::White),
            (0, 3, Stone::White),
            (0, 4, Stone::Black),
        ]);
        let (_, white) = tally(&board);
        assert_eq!(white.get(Block::FourTwoWalls), 1);
        assert_eq!(evaluate(&board, Stone::White).0, 20);
    }

    #[test]
    fn test_color_swap_symmetry() {
        let board = board_with(&[
            (2, 2, Stone::Black),
            (3, 3, Stone::Black),
            (4, 4, Stone::Black),
            (2, 3, Stone::White),
            (2, 4, Stone::White),
            (5, 5, Stone::White),
        ]);
        let swapped = board.color_swapped();
        let (b_mine, b_theirs) = evaluate(&board, Stone::Black);
        let (s_mine, s_theirs) = evaluate(&swapped, Stone::Black);
        assert_eq!((b_mine, b_theirs), (s_theirs, s_mine));
        assert_eq!(evaluate(&board, Stone::Black), evaluate(&swapped, Stone::White));
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine(40, 30), 10);
        assert_eq!(combine(30, 80), -50);
        assert_eq!(combine(90, 0), 90, "90 is not above the threshold");
        assert_eq!(combine(100, 100), 100, "own near-certain threat first");
        assert_eq!(combine(20, 100), -100);
    }
}
