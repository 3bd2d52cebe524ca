//! Candidate move generation and ordering
//!
//! Candidates are empty cells within `max_distance` (Chebyshev) of some stone.
//! Moves that complete a five come first; the rest are ordered by a quick
//! static score so alpha-beta sees the most promising moves early.

use crate::board::{Board, Pos, Stone, MAX_CELLS};
use crate::eval::{evaluate, PatternScore};
use crate::rules::completes_five;

use super::alphabeta::SearchConfig;

/// A cell to try, with its ordering score when one was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub pos: Pos,
    pub score: Option<i32>,
}

impl Move {
    #[inline]
    pub fn new(pos: Pos, score: Option<i32>) -> Self {
        Self { pos, score }
    }
}

/// Cells within `distance` of any stone, as a row-major membership mask.
fn near_mask(board: &Board, distance: u8) -> [bool; MAX_CELLS] {
    let n = board.size() as i32;
    let d = i32::from(distance);
    let mut mask = [false; MAX_CELLS];
    for (pos, _) in board.occupied() {
        let (r0, c0) = (i32::from(pos.row), i32::from(pos.col));
        for r in (r0 - d).max(0)..=(r0 + d).min(n - 1) {
            for c in (c0 - d).max(0)..=(c0 + d).min(n - 1) {
                #[allow(clippy::cast_sign_loss)]
                let idx = (r * n + c) as usize;
                mask[idx] = true;
            }
        }
    }
    mask
}

/// Generate ordered candidate moves for `color`.
///
/// With `config.opening` set (and the center free), or on an empty board, the
/// only candidate is the center. The board is used for tentative placements
/// and is restored before returning.
///
/// # Arguments
/// * `board` - Position to expand
/// * `color` - Side to move
/// * `config` - Supplies `max_distance` and the opening flag
pub fn generate_candidates(board: &mut Board, color: Stone, config: &SearchConfig) -> Vec<Move> {
    let center = board.center();
    if board.is_board_empty() || (config.opening && board.is_empty(center)) {
        return vec![Move::new(center, None)];
    }

    let n = board.size();
    let mask = near_mask(board, config.max_distance);
    let mut winners = Vec::new();
    let mut scored: Vec<Move> = Vec::new();

    for row in 0..n {
        for col in 0..n {
            if !mask[row * n + col] {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            let pos = Pos::new(row as u8, col as u8);
            if !board.is_empty(pos) {
                continue;
            }

            board.place_stone(pos, color);
            if completes_five(board, pos, color) {
                winners.push(Move::new(pos, Some(PatternScore::WIN)));
            } else {
                let (mine, theirs) = evaluate(board, color);
                scored.push(Move::new(pos, Some(mine - theirs)));
            }
            board.remove_stone(pos);
        }
    }

    // Stable: equal scores keep row-major order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    winners.extend(scored);
    winners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSize;

    fn config(max_distance: u8, opening: bool) -> SearchConfig {
        SearchConfig {
            max_depth: 1,
            max_distance,
            opening,
        }
    }

    #[test]
    fn test_opening_returns_center_only() {
        let mut board = Board::new(BoardSize::NINE);
        let moves = generate_candidates(&mut board, Stone::Black, &config(2, true));
        assert_eq!(moves, vec![Move::new(Pos::new(4, 4), None)]);
    }

    #[test]
    fn test_empty_board_returns_center_without_flag() {
        let mut board = Board::new(BoardSize::THIRTEEN);
        let moves = generate_candidates(&mut board, Stone::Black, &config(1, false));
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].pos, Pos::new(6, 6));
    }

    #[test]
    fn test_opening_ignored_when_center_taken() {
        let mut board = Board::new(BoardSize::NINE);
        board.place_stone(Pos::new(4, 4), Stone::Black);
        let moves = generate_candidates(&mut board, Stone::White, &config(1, true));
        assert_eq!(moves.len(), 8, "the ring around the center");
        assert!(moves.iter().all(|m| m.pos != Pos::new(4, 4)));
    }

    #[test]
    fn test_distance_filter() {
        let mut board = Board::new(BoardSize::NINE);
        board.place_stone(Pos::new(0, 0), Stone::Black);
        let near = generate_candidates(&mut board, Stone::White, &config(1, false));
        assert_eq!(near.len(), 3);
        let far = generate_candidates(&mut board, Stone::White, &config(2, false));
        assert_eq!(far.len(), 8);
        assert!(far.iter().all(|m| m.pos.chebyshev(Pos::new(0, 0)) <= 2));
    }

    #[test]
    fn test_only_empty_cells_and_board_restored() {
        let mut board = Board::new(BoardSize::NINE);
        for (r, c, s) in [(3, 3, Stone::Black), (3, 4, Stone::White), (4, 4, Stone::Black)] {
            board.place_stone(Pos::new(r, c), s);
        }
        let before = board.clone();
        let moves = generate_candidates(&mut board, Stone::White, &config(2, false));
        assert_eq!(board, before, "tentative placements must be reverted");
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| board.is_empty(m.pos)));
    }

    #[test]
    fn test_winning_moves_first() {
        let mut board = Board::new(BoardSize::NINE);
        for col in 1..5 {
            board.place_stone(Pos::new(2, col), Stone::White);
        }
        board.place_stone(Pos::new(6, 6), Stone::Black);
        let moves = generate_candidates(&mut board, Stone::White, &config(1, false));
        assert_eq!(moves[0], Move::new(Pos::new(2, 0), Some(PatternScore::WIN)));
        assert_eq!(moves[1], Move::new(Pos::new(2, 5), Some(PatternScore::WIN)));
        assert!(moves[2..].iter().all(|m| m.score < Some(PatternScore::WIN)));
    }

    #[test]
    fn test_sorted_descending_after_winners() {
        let mut board = Board::new(BoardSize::NINE);
        board.place_stone(Pos::new(4, 4), Stone::Black);
        board.place_stone(Pos::new(4, 5), Stone::Black);
        board.place_stone(Pos::new(3, 3), Stone::White);
        let moves = generate_candidates(&mut board, Stone::Black, &config(1, false));
        for pair in moves.windows(2) {
            assert!(pair[0].score >= pair[1].score, "{pair:?} out of order");
        }
        // Extending the two to an open three is the top quiet move
        assert_eq!(moves[0].score, Some(80));
    }
}
