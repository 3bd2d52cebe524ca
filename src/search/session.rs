//! Stepwise search driver
//!
//! A [`SearchSession`] splits one move decision into chunks: `setup` builds
//! the root candidate list, each `next_move` evaluates one root candidate,
//! and `finish` applies the best move found so far to a copy of the board.
//! The caller can do other work (render a frame, poll input) between calls.

use tracing::{debug, instrument, warn};

use crate::board::{Board, Pos, Stone};
use crate::error::EngineError;
use crate::rules::{check_outcome, GameOutcome};

use super::alphabeta::{SearchConfig, SearchStats, Searcher};
use super::candidates::Move;

/// In-progress move decision.
#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Untouched snapshot of the caller's board
    original: Board,
    /// Working copy used for place/revert
    work: Board,
    searcher: Searcher,
    candidates: Vec<Move>,
    cursor: usize,
    best: Option<(Pos, i32)>,
}

/// Outcome of a finished session.
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// Chosen cell (empty in the original board)
    pub best_move: Pos,
    /// Score of the chosen move; `None` if no candidate was evaluated
    pub score: Option<i32>,
    /// Copy of the original board with the move applied
    pub board: Board,
    /// Root candidates evaluated before `finish`
    pub evaluated: usize,
    /// Root candidates available
    pub candidates: usize,
    pub stats: SearchStats,
}

impl SearchSession {
    /// Snapshot `board` and compute the root candidates for `color`.
    ///
    /// # Errors
    /// `PreconditionViolation` when `color` is `Empty`, the config has a zero
    /// depth or distance, the board already has a winner, or it has no empty
    /// cell.
    #[instrument(level = "debug", skip(board), fields(size = board.size(), stones = board.stone_count()))]
    pub fn setup(board: &Board, color: Stone, config: SearchConfig) -> Result<Self, EngineError> {
        if color == Stone::Empty {
            return Err(EngineError::precondition("no side to move"));
        }
        if config.max_depth == 0 || config.max_distance == 0 {
            return Err(EngineError::precondition(format!(
                "search depth and distance must be at least 1 (got {}, {})",
                config.max_depth, config.max_distance
            )));
        }
        match check_outcome(board) {
            GameOutcome::Win(winner) => {
                return Err(EngineError::precondition(format!(
                    "game is already won by {}",
                    winner.name()
                )));
            }
            GameOutcome::Draw => {
                return Err(EngineError::precondition("board has no empty cell"));
            }
            GameOutcome::NoResult => {}
        }

        let searcher = Searcher::new(config, color);
        let mut work = board.clone();
        let candidates = searcher.root_candidates(&mut work);
        if candidates.is_empty() {
            return Err(EngineError::precondition("no candidate moves"));
        }
        debug!(count = candidates.len(), "root candidates ready");

        Ok(Self {
            original: board.clone(),
            work,
            searcher,
            candidates,
            cursor: 0,
            best: None,
        })
    }

    /// Number of root candidates `next_move` will evaluate.
    #[inline]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Root candidates evaluated so far
    #[inline]
    pub fn evaluated(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.candidates.len()
    }

    /// Ordered root candidates
    pub fn candidates(&self) -> &[Move] {
        &self.candidates
    }

    /// Best `(move, score)` among the evaluated candidates
    pub fn best(&self) -> Option<(Pos, i32)> {
        self.best
    }

    pub fn stats(&self) -> SearchStats {
        self.searcher.stats()
    }

    /// Rounded share of candidates evaluated, in percent.
    #[inline]
    pub fn progress(&self) -> u8 {
        let total = self.candidates.len().max(1);
        let pct = (self.cursor * 100 + total / 2) / total;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }

    /// Evaluate the next root candidate and return progress in `0..=100`.
    ///
    /// Calls past the last candidate do nothing and return 100.
    pub fn next_move(&mut self) -> u8 {
        let Some(&candidate) = self.candidates.get(self.cursor) else {
            warn!(
                count = self.candidates.len(),
                "next_move called after every candidate was evaluated"
            );
            return 100;
        };

        let score = self.searcher.evaluate_root_move(&mut self.work, candidate.pos);
        self.cursor += 1;

        let improved = self.best.map_or(true, |(_, best)| score > best);
        if improved {
            self.best = Some((candidate.pos, score));
        }
        debug!(
            pos = %candidate.pos,
            score,
            improved,
            progress = self.progress(),
            "root move evaluated"
        );
        self.progress()
    }

    /// Evaluate every remaining candidate.
    pub fn run_to_end(&mut self) {
        while !self.is_complete() {
            self.next_move();
        }
    }

    /// Apply the best move found so far to a copy of the original board.
    ///
    /// Before any `next_move`, the first candidate (the generator's best
    /// guess) is used.
    #[instrument(level = "debug", skip(self), fields(evaluated = self.cursor, count = self.candidates.len()))]
    pub fn finish(self) -> SessionResult {
        let (best_move, score) = match self.best {
            Some((pos, score)) => (pos, Some(score)),
            // setup guarantees at least one candidate
            None => (self.candidates[0].pos, None),
        };
        debug_assert!(self.original.is_empty(best_move));

        let mut board = self.original;
        board.place_stone(best_move, self.searcher.root());
        debug!(pos = %best_move, ?score, "move chosen");

        SessionResult {
            best_move,
            score,
            board,
            evaluated: self.cursor,
            candidates: self.candidates.len(),
            stats: self.searcher.stats(),
        }
    }
}
