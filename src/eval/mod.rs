//! Position evaluation
//!
//! - [`patterns`]: block categories, tallies and the priority ladder
//! - [`heuristic`]: whole-board scoring built on the line scanner

pub mod heuristic;
pub mod patterns;

pub use heuristic::{combine, evaluate, static_score, tally};
pub use patterns::{ladder_score, Block, BlockTally, PatternScore, Rung, LADDER};
