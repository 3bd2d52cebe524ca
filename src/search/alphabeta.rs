//! Depth-bounded minimax with alpha-beta pruning
//!
//! Scores are always from the root mover's point of view: the root mover
//! maximizes, the opponent minimizes. Every node runs three checks before
//! expanding:
//!
//! 1. Terminal: five in a row or a full board (`±WIN` / `0`)
//! 2. Near-certain: the side that just moved has a ladder score above
//!    [`PatternScore::NEAR_CERTAIN`]; its raw score is returned
//! 3. Depth limit: combined static score for the root mover
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, BoardSize, Pos, Stone};
//! use gomoku::search::{SearchConfig, Searcher};
//!
//! let mut board = Board::new(BoardSize::NINE);
//! board.place_stone(Pos::new(4, 4), Stone::Black);
//!
//! let config = SearchConfig { max_depth: 1, max_distance: 1, opening: false };
//! let mut searcher = Searcher::new(config, Stone::White);
//! let result = searcher.search(&board);
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: ({}, {})", best_move.row, best_move.col);
//! }
//! ```

use crate::board::{Board, Pos, Stone};
use crate::eval::{combine, tally, PatternScore};
use crate::rules::{check_outcome, GameOutcome};

use super::candidates::{generate_candidates, Move};

/// Infinity score for alpha-beta bounds
pub const INF: i32 = PatternScore::WIN + 1;

/// Search parameters for one move decision.
///
/// Produced by a difficulty profile; the engine never picks its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched after the root move (>= 1)
    pub max_depth: u8,
    /// Chebyshev radius around existing stones for candidates (>= 1)
    pub max_distance: u8,
    /// Root-only: play the center if it is free
    pub opening: bool,
}

impl SearchConfig {
    /// Same parameters with the opening flag cleared, for internal nodes.
    #[inline]
    pub fn interior(self) -> Self {
        Self {
            opening: false,
            ..self
        }
    }
}

/// Search statistics for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited (every minimax call)
    pub nodes: u64,
    /// Loops broken by `beta <= alpha`
    pub cutoffs: u64,
    /// Nodes returned early on a near-certain score
    pub near_certain: u64,
    /// Nodes evaluated at the depth limit
    pub leaves: u64,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Score of the best move, root mover's view
    pub score: i32,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Minimax searcher for one side and one configuration.
///
/// Owns its statistics; nothing is shared between searchers.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    root: Stone,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher for `root` (the side whose move is being chosen).
    pub fn new(config: SearchConfig, root: Stone) -> Self {
        Self {
            config,
            root,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    #[inline]
    pub fn root(&self) -> Stone {
        self.root
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Ordered first-ply moves, honoring the opening flag.
    pub fn root_candidates(&self, board: &mut Board) -> Vec<Move> {
        generate_candidates(board, self.root, &self.config)
    }

    /// Exact minimax value of playing `pos` at the root.
    ///
    /// Uses a full window so the value does not depend on earlier root moves.
    /// The board is restored before returning.
    pub fn evaluate_root_move(&mut self, board: &mut Board, pos: Pos) -> i32 {
        board.place_stone(pos, self.root);
        let score = self.minimax(board, 0, -INF, INF, false);
        board.remove_stone(pos);
        score
    }

    /// One-shot search: evaluate every root candidate and keep the best.
    ///
    /// Ties keep the earlier candidate.
    pub fn search(&mut self, board: &Board) -> SearchResult {
        let mut work = board.clone();
        let candidates = self.root_candidates(&mut work);

        let mut best_move = candidates.first().map(|m| m.pos);
        let mut best_score = -INF;
        for m in &candidates {
            let score = self.evaluate_root_move(&mut work, m.pos);
            if score > best_score {
                best_score = score;
                best_move = Some(m.pos);
            }
        }

        SearchResult {
            best_move,
            score: best_score,
            stats: self.stats,
        }
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// `maximizing` is true when the root mover is to move. Every placement is
    /// reverted before the call returns, including on cutoffs.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.stats.nodes += 1;

        match check_outcome(board) {
            GameOutcome::Win(color) if color == self.root => return PatternScore::WIN,
            GameOutcome::Win(_) => return -PatternScore::WIN,
            GameOutcome::Draw => return 0,
            GameOutcome::NoResult => {}
        }

        let (black, white) = tally(board);
        let (root_score, opp_score) = match self.root {
            Stone::White => (white.score(), black.score()),
            _ => (black.score(), white.score()),
        };

        // The side that just moved is the root mover on minimizing nodes
        let (last_score, sign) = if maximizing {
            (opp_score, -1)
        } else {
            (root_score, 1)
        };
        if last_score > PatternScore::NEAR_CERTAIN {
            self.stats.near_certain += 1;
            return sign * last_score;
        }

        if depth >= self.config.max_depth {
            self.stats.leaves += 1;
            return combine(root_score, opp_score);
        }

        let to_move = if maximizing {
            self.root
        } else {
            self.root.opponent()
        };
        let moves = generate_candidates(board, to_move, &self.config.interior());
        if moves.is_empty() {
            self.stats.leaves += 1;
            return combine(root_score, opp_score);
        }

        if maximizing {
            let mut best = -INF;
            for m in &moves {
                board.place_stone(m.pos, to_move);
                let score = self.minimax(board, depth + 1, alpha, beta, false);
                board.remove_stone(m.pos);

                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = INF;
            for m in &moves {
                board.place_stone(m.pos, to_move);
                let score = self.minimax(board, depth + 1, alpha, beta, true);
                board.remove_stone(m.pos);

                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSize;
    use crate::eval::evaluate;

    fn board_with(size: usize, stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::with_size(size).unwrap();
        for &(r, c, s) in stones {
            board.place_stone(Pos::new(r, c), s);
        }
        board
    }

    /// Reference minimax with no pruning, same node rules.
    fn plain_minimax(
        board: &mut Board,
        config: SearchConfig,
        root: Stone,
        depth: u8,
        maximizing: bool,
    ) -> i32 {
        match check_outcome(board) {
            GameOutcome::Win(c) if c == root => return PatternScore::WIN,
            GameOutcome::Win(_) => return -PatternScore::WIN,
            GameOutcome::Draw => return 0,
            GameOutcome::NoResult => {}
        }
        let (root_score, opp_score) = evaluate(board, root);
        let just_moved = if maximizing { opp_score } else { root_score };
        if just_moved > PatternScore::NEAR_CERTAIN {
            return if maximizing { -just_moved } else { just_moved };
        }
        if depth >= config.max_depth {
            return combine(root_score, opp_score);
        }
        let to_move = if maximizing { root } else { root.opponent() };
        let moves = generate_candidates(board, to_move, &config.interior());
        if moves.is_empty() {
            return combine(root_score, opp_score);
        }
        let scores = moves.iter().map(|m| {
            board.place_stone(m.pos, to_move);
            let s = plain_minimax(board, config, root, depth + 1, !maximizing);
            board.remove_stone(m.pos);
            s
        });
        let scores: Vec<i32> = scores.collect();
        if maximizing {
            scores.into_iter().max().unwrap_or(-INF)
        } else {
            scores.into_iter().min().unwrap_or(INF)
        }
    }

    fn cross_check(board: &Board, root: Stone) {
        let config = SearchConfig {
            max_depth: 2,
            max_distance: 1,
            opening: false,
        };
        let mut searcher = Searcher::new(config, root);
        let mut work = board.clone();
        for m in searcher.root_candidates(&mut work) {
            let pruned = searcher.evaluate_root_move(&mut work, m.pos);

            work.place_stone(m.pos, root);
            let plain = plain_minimax(&mut work, config, root, 0, false);
            work.remove_stone(m.pos);

            assert_eq!(pruned, plain, "root move {} disagrees with full minimax", m.pos);
        }
        assert_eq!(&work, board, "search must leave the board untouched");
    }

    #[test]
    fn test_alphabeta_matches_minimax_quiet_position() {
        let board = board_with(5, &[(2, 2, Stone::Black), (1, 2, Stone::White), (2, 3, Stone::Black)]);
        cross_check(&board, Stone::White);
    }

    #[test]
    fn test_alphabeta_matches_minimax_tactical_position() {
        let board = board_with(
            5,
            &[
                (1, 1, Stone::Black),
                (2, 2, Stone::Black),
                (3, 3, Stone::Black),
                (0, 1, Stone::White),
                (0, 2, Stone::White),
                (4, 0, Stone::White),
            ],
        );
        cross_check(&board, Stone::White);
        cross_check(&board, Stone::Black);
    }

    #[test]
    fn test_takes_immediate_win() {
        let board = board_with(
            9,
            &[
                (4, 0, Stone::White),
                (4, 1, Stone::White),
                (4, 2, Stone::White),
                (4, 3, Stone::White),
                (0, 0, Stone::Black),
                (0, 1, Stone::Black),
                (0, 2, Stone::Black),
                (8, 8, Stone::Black),
            ],
        );
        let config = SearchConfig {
            max_depth: 2,
            max_distance: 1,
            opening: false,
        };
        let mut searcher = Searcher::new(config, Stone::White);
        let result = searcher.search(&board);
        assert_eq!(result.best_move, Some(Pos::new(4, 4)));
        assert_eq!(result.score, PatternScore::WIN);
        assert!(result.stats.nodes > 0);
    }

    #[test]
    fn test_near_certain_returns_raw_score() {
        // Black just made an open four; White to move sees it immediately
        let mut board = board_with(
            9,
            &[
                (4, 2, Stone::Black),
                (4, 3, Stone::Black),
                (4, 4, Stone::Black),
                (4, 5, Stone::Black),
                (0, 0, Stone::White),
            ],
        );
        let config = SearchConfig {
            max_depth: 3,
            max_distance: 1,
            opening: false,
        };
        let mut searcher = Searcher::new(config, Stone::Black);
        let score = searcher.minimax(&mut board, 0, -INF, INF, false);
        assert_eq!(score, PatternScore::MAX);
        assert_eq!(searcher.stats().near_certain, 1);
        assert_eq!(searcher.stats().nodes, 1);
    }

    #[test]
    fn test_near_certain_against_root_is_negative() {
        // White (opponent) just made an open four; Black, the root mover, is to move
        let mut board = board_with(
            9,
            &[
                (4, 2, Stone::White),
                (4, 3, Stone::White),
                (4, 4, Stone::White),
                (4, 5, Stone::White),
                (0, 0, Stone::Black),
            ],
        );
        let config = SearchConfig {
            max_depth: 3,
            max_distance: 1,
            opening: false,
        };
        let mut searcher = Searcher::new(config, Stone::Black);
        let score = searcher.minimax(&mut board, 0, -INF, INF, true);
        assert_eq!(score, -PatternScore::MAX);
        assert_eq!(searcher.stats().near_certain, 1);
        assert_eq!(searcher.stats().nodes, 1);
    }

    #[test]
    fn test_opening_only_at_root() {
        let board = Board::new(BoardSize::NINE);
        let config = SearchConfig {
            max_depth: 1,
            max_distance: 1,
            opening: true,
        };
        let mut searcher = Searcher::new(config, Stone::Black);
        let result = searcher.search(&board);
        assert_eq!(result.best_move, Some(Pos::new(4, 4)));
        // The reply ply expanded the ring around the center, not just one cell
        assert!(searcher.stats().nodes > 2);
    }

    #[test]
    fn test_search_restores_board() {
        let board = board_with(9, &[(4, 4, Stone::Black), (4, 5, Stone::White), (5, 5, Stone::Black)]);
        let before = board.clone();
        let config = SearchConfig {
            max_depth: 2,
            max_distance: 1,
            opening: false,
        };
        let result = Searcher::new(config, Stone::White).search(&board);
        assert_eq!(board, before);
        let best = result.best_move.unwrap();
        assert!(board.is_empty(best));
    }
}
