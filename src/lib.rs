//! Five-in-a-row engine with a steppable minimax opponent
//!
//! Rules of the game:
//! - Square N x N board, N in 5..=19 (the game offers 9, 13 and 19)
//! - A run of exactly 5 stones wins; longer runs do not
//! - A full board without a five is a draw
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Line scanning and win/draw detection
//! - [`eval`]: Run classification and the priority-ladder heuristic
//! - [`search`]: Candidate generation, alpha-beta and the stepwise session
//! - [`engine`]: Main AI engine integrating all components
//! - [`config`]: Difficulty profiles, player types and TOML settings
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, BoardSize, Difficulty, Pos, Stone};
//!
//! let mut board = Board::new(BoardSize::NINE);
//! board.place_stone(Pos::new(4, 4), Stone::Black);
//!
//! // Step through the root candidates, as a UI would between frames
//! let mut engine = AIEngine::new(Difficulty::Easy);
//! let candidates = engine.setup(&board, Stone::White).unwrap();
//! assert!(candidates > 0);
//! for _ in 0..candidates {
//!     let _progress = engine.next_move().unwrap();
//! }
//! let result = engine.finish().unwrap();
//!
//! assert!(board.is_empty(result.best_move));
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, BoardSize, Pos, Stone};
pub use config::{Difficulty, GameConfig, PlayerKind};
pub use engine::{AIEngine, MoveResult};
pub use error::EngineError;
