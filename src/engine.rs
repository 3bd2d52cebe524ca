//! AI engine: the stepwise search protocol as a long-lived object
//!
//! The engine holds at most one [`SearchSession`]. A caller drives it with
//! `setup` → `next_move` (repeatedly) → `finish`, doing other work between
//! calls, or uses [`AIEngine::get_move`] for a single blocking decision.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, BoardSize, Difficulty, Pos, Stone};
//!
//! let mut board = Board::new(BoardSize::NINE);
//! board.place_stone(Pos::new(4, 4), Stone::Black);
//!
//! let mut engine = AIEngine::new(Difficulty::Easy);
//! let count = engine.setup(&board, Stone::White).unwrap();
//! for _ in 0..count {
//!     let progress = engine.next_move().unwrap();
//!     println!("{progress}%");
//! }
//! let result = engine.finish().unwrap();
//! println!("Best move: {}", result.best_move);
//! ```

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::Difficulty;
use crate::error::EngineError;
use crate::search::{SearchConfig, SearchSession, SearchStats};

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen cell, empty in the board given to `setup`
    pub best_move: Pos,
    /// Score of the chosen move from the mover's view (`None` if the
    /// session was finished before any candidate was evaluated)
    pub score: Option<i32>,
    /// Copy of the input board with the move applied
    pub board: Board,
    /// Root candidates evaluated
    pub evaluated: usize,
    /// Root candidates available
    pub candidates: usize,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time between `setup` and `finish` in milliseconds
    pub time_ms: u64,
    pub stats: SearchStats,
}

/// Search session plus the time it was started.
#[derive(Debug)]
struct ActiveSearch {
    session: SearchSession,
    started: Instant,
}

/// Stepwise move-search engine for one difficulty.
#[derive(Debug)]
pub struct AIEngine {
    difficulty: Difficulty,
    active: Option<ActiveSearch>,
}

impl AIEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            active: None,
        }
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Change strength; takes effect at the next `setup`.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// True between `setup` and `finish`
    #[inline]
    pub fn is_searching(&self) -> bool {
        self.active.is_some()
    }

    /// Progress of the active search, if any
    pub fn progress(&self) -> Option<u8> {
        self.active.as_ref().map(|a| a.session.progress())
    }

    /// Start a search for `color` using this engine's difficulty profile.
    ///
    /// Any unfinished session is dropped.
    ///
    /// # Returns
    ///
    /// How many root candidates `next_move` will evaluate.
    ///
    /// # Errors
    ///
    /// `PreconditionViolation` if the board cannot be searched.
    pub fn setup(&mut self, board: &Board, color: Stone) -> Result<usize, EngineError> {
        let config = self.difficulty.search_config(board);
        self.setup_with(board, color, config)
    }

    /// Start a search with explicit parameters.
    pub fn setup_with(
        &mut self,
        board: &Board,
        color: Stone,
        config: SearchConfig,
    ) -> Result<usize, EngineError> {
        if self.active.take().is_some() {
            warn!("setup replaced an unfinished search");
        }
        let session = SearchSession::setup(board, color, config)?;
        let count = session.candidate_count();
        self.active = Some(ActiveSearch {
            session,
            started: Instant::now(),
        });
        Ok(count)
    }

    /// Evaluate one root candidate and return progress in `0..=100`.
    ///
    /// # Errors
    ///
    /// `SequenceViolation` if no search is active.
    pub fn next_move(&mut self) -> Result<u8, EngineError> {
        let Some(active) = self.active.as_mut() else {
            warn!("next_move called without setup");
            return Err(EngineError::sequence("next_move called without setup"));
        };
        Ok(active.session.next_move())
    }

    /// Evaluate one root candidate and, once every candidate has been
    /// evaluated, finish the search.
    ///
    /// Returns `None` while candidates remain. This is the per-frame driver:
    /// completion is decided by the candidate count, not by the rounded
    /// progress, which reads 100 before the last of 200 or more candidates.
    ///
    /// # Errors
    ///
    /// `SequenceViolation` if no search is active.
    pub fn step(&mut self) -> Result<Option<MoveResult>, EngineError> {
        self.next_move()?;
        if self.active.as_ref().is_some_and(|a| a.session.is_complete()) {
            self.finish().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Apply the best move found so far and end the search.
    ///
    /// # Errors
    ///
    /// `SequenceViolation` if no search is active.
    pub fn finish(&mut self) -> Result<MoveResult, EngineError> {
        let Some(active) = self.active.take() else {
            warn!("finish called without setup");
            return Err(EngineError::sequence("finish called without setup"));
        };
        let elapsed = active.started.elapsed();
        let result = active.session.finish();

        let move_result = MoveResult {
            best_move: result.best_move,
            score: result.score,
            board: result.board,
            evaluated: result.evaluated,
            candidates: result.candidates,
            nodes: result.stats.nodes,
            time_ms: millis(elapsed),
            stats: result.stats,
        };
        info!(
            pos = %move_result.best_move,
            score = ?move_result.score,
            evaluated = move_result.evaluated,
            nodes = move_result.nodes,
            time_ms = move_result.time_ms,
            "engine move"
        );
        Ok(move_result)
    }

    /// Run a complete search in one call.
    ///
    /// Equivalent to `setup`, `next_move` for every candidate, then `finish`.
    pub fn get_move(&mut self, board: &Board, color: Stone) -> Result<MoveResult, EngineError> {
        let count = self.setup(board, color)?;
        for _ in 0..count {
            self.next_move()?;
        }
        self.finish()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new(Difficulty::Medium)
    }
}

#[inline]
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
