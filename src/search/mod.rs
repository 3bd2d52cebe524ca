//! Search module for the five-in-a-row AI
//!
//! Contains:
//! - Candidate generation with distance pruning and quick-score ordering
//! - Minimax with alpha-beta pruning and near-certain cutoffs
//! - A stepwise session driver (setup / next_move / finish)

pub mod alphabeta;
pub mod candidates;
pub mod session;

pub use alphabeta::{SearchConfig, SearchResult, SearchStats, Searcher, INF};
pub use candidates::{generate_candidates, Move};
pub use session::{SearchSession, SessionResult};
