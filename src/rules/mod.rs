//! Game rules for five-in-a-row
//!
//! - Line scanning (runs of same-colored stones and their open ends)
//! - Win conditions (exactly five in a row) and draws (full board)

pub mod line;
pub mod win;

// Re-exports for convenient access
pub use line::{runs, scan_run, Direction, Run, DIRECTIONS};
pub use win::{check_outcome, completes_five, winning_line, GameOutcome, WIN_LENGTH};
