//! GUI module for the game
//!
//! A native window built with egui/eframe. Computer turns are driven through
//! the stepwise engine API from the frame loop.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::{GameResult, GameState};
