//! Game state management for the GUI
//!
//! Computer turns run on the UI thread through the stepwise engine API: one
//! root candidate is evaluated per frame, so the window keeps repainting and
//! the side panel can show a progress bar.

use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::config::{GameConfig, PlayerKind};
use crate::rules::{check_outcome, winning_line, GameOutcome};
use crate::{AIEngine, Board, Difficulty, EngineError, MoveResult, Pos, Stone};

/// How a finished game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: GameOutcome,
    pub winning_line: Option<Vec<Pos>>,
}

impl GameResult {
    pub fn winner(&self) -> Option<Stone> {
        match self.outcome {
            GameOutcome::Win(color) => Some(color),
            _ => None,
        }
    }
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub config: GameConfig,
    pub current_turn: Stone,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_ai_result: Option<MoveResult>,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
    engine: AIEngine,
    /// Candidates of the running computer search, `None` when idle
    ai_candidates: Option<usize>,
    /// Set when the computer could not search this position
    ai_failed: bool,
}

impl GameState {
    /// Start a game; the config is expected to be validated.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        let board = Board::with_size(config.board_size)?;
        Ok(Self {
            board,
            config,
            current_turn: Stone::Black,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            move_timer: MoveTimer::default(),
            message: None,
            engine: AIEngine::new(Difficulty::Medium),
            ai_candidates: None,
            ai_failed: false,
        })
    }

    /// New game with the same settings
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.board_size());
        self.current_turn = Stone::Black;
        self.game_over = None;
        self.last_move = None;
        self.move_history.clear();
        self.last_ai_result = None;
        self.move_timer = MoveTimer::default();
        self.message = None;
        self.engine = AIEngine::new(Difficulty::Medium);
        self.ai_candidates = None;
        self.ai_failed = false;
    }

    /// Apply new settings and restart. The board is resized if needed.
    pub fn apply_config(&mut self, config: GameConfig) -> Result<(), EngineError> {
        let board = Board::with_size(config.board_size)?;
        self.config = config;
        self.reset();
        self.board = board;
        Ok(())
    }

    pub fn current_player(&self) -> PlayerKind {
        self.config.player(self.current_turn)
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        self.game_over.is_none() && !self.current_player().is_computer()
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        self.game_over.is_none() && self.current_player().is_computer()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        self.ai_candidates.is_some()
    }

    /// Progress of the running computer search in percent
    pub fn ai_progress(&self) -> Option<u8> {
        self.engine.progress()
    }

    /// Attempt to place a stone for the human player
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() || !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.board
            .try_place(pos, self.current_turn)
            .map_err(|e| e.to_string())?;
        self.record_move(pos);
        Ok(())
    }

    /// Bookkeeping after a stone of `current_turn` landed on `pos`
    fn record_move(&mut self, pos: Pos) {
        let color = self.current_turn;
        self.move_history.push((pos, color));
        self.last_move = Some(pos);
        self.move_timer.stop();
        self.message = None;

        let outcome = check_outcome(&self.board);
        if outcome.is_terminal() {
            let line = winning_line(&self.board).map(|(_, line)| line);
            info!(?outcome, moves = self.move_history.len(), "game over");
            self.game_over = Some(GameResult {
                outcome,
                winning_line: line,
            });
            return;
        }

        self.current_turn = color.opponent();
        self.move_timer.start();
    }

    /// Advance the computer's search by one root candidate.
    ///
    /// Called once per frame. The first call on a computer turn sets up the
    /// search; the call that evaluates the last candidate plays the move.
    /// After a failed setup the computer stays idle until the position
    /// changes (undo or a new game).
    pub fn step_ai(&mut self) {
        let PlayerKind::Computer(difficulty) = self.current_player() else {
            return;
        };
        if self.game_over.is_some() || self.ai_failed {
            return;
        }

        if self.ai_candidates.is_none() {
            self.engine.set_difficulty(difficulty);
            match self.engine.setup(&self.board, self.current_turn) {
                Ok(count) => self.ai_candidates = Some(count),
                Err(e) => {
                    error!(error = %e, "computer could not start a search");
                    self.message = Some(format!("AI error: {e}"));
                    self.ai_failed = true;
                    return;
                }
            }
        }

        match self.engine.step() {
            Ok(None) => {}
            Ok(Some(result)) => {
                self.ai_candidates = None;
                let pos = result.best_move;
                self.board = result.board.clone();
                self.last_ai_result = Some(result);
                self.record_move(pos);
            }
            Err(e) => {
                error!(error = %e, "computer search step failed");
                self.message = Some(format!("AI error: {e}"));
                self.ai_candidates = None;
                self.ai_failed = true;
            }
        }
    }

    /// Undo back to the most recent human turn.
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        let mut keep = self.move_history.len() - 1;
        // Skip back over computer moves so the human is to move again
        while keep > 0 && self.config.player(self.move_history[keep].1).is_computer() {
            keep -= 1;
        }
        if self.config.player(self.move_history[keep].1).is_computer() {
            return;
        }

        // Simple undo: reset and replay
        let moves: Vec<_> = self.move_history.drain(..keep).collect();
        self.board = Board::new(self.board.board_size());
        self.move_history.clear();
        self.current_turn = Stone::Black;
        self.game_over = None;
        self.last_move = None;
        self.last_ai_result = None;
        self.ai_failed = false;

        for (pos, color) in moves {
            self.board.place_stone(pos, color);
            self.move_history.push((pos, color));
            self.last_move = Some(pos);
            self.current_turn = color.opponent();
        }

        self.move_timer.start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human_vs_human() -> GameConfig {
        GameConfig {
            board_size: 9,
            black: PlayerKind::Human,
            white: PlayerKind::Human,
        }
    }

    #[test]
    fn test_human_moves_alternate() {
        let mut game = GameState::new(human_vs_human()).unwrap();
        assert!(game.try_place_stone(Pos::new(4, 4)).is_ok());
        assert_eq!(game.current_turn, Stone::White);
        assert!(game.try_place_stone(Pos::new(4, 4)).is_err(), "occupied");
        assert!(game.try_place_stone(Pos::new(3, 3)).is_ok());
        assert_eq!(game.current_turn, Stone::Black);
        assert_eq!(game.move_history.len(), 2);
    }

    #[test]
    fn test_five_ends_game() {
        let mut game = GameState::new(human_vs_human()).unwrap();
        for col in 0..4 {
            game.try_place_stone(Pos::new(0, col)).unwrap();
            game.try_place_stone(Pos::new(8, col)).unwrap();
        }
        game.try_place_stone(Pos::new(0, 4)).unwrap();

        let result = game.game_over.clone().unwrap();
        assert_eq!(result.winner(), Some(Stone::Black));
        assert_eq!(result.winning_line.map(|l| l.len()), Some(5));
        assert!(game.try_place_stone(Pos::new(5, 5)).is_err());
    }

    #[test]
    fn test_computer_turn_steps_to_a_move() {
        let config = GameConfig {
            board_size: 9,
            black: PlayerKind::Human,
            white: PlayerKind::Computer(Difficulty::Easy),
        };
        let mut game = GameState::new(config).unwrap();
        game.try_place_stone(Pos::new(4, 4)).unwrap();
        assert!(game.is_ai_turn());

        let mut frames = 0;
        while game.current_turn == Stone::White && frames < 100 {
            game.step_ai();
            frames += 1;
        }
        assert_eq!(game.current_turn, Stone::Black);
        assert_eq!(game.board.stone_count(), 2);
        assert!(frames > 1, "search should span several frames");
        assert!(game.last_ai_result.is_some());
    }

    #[test]
    fn test_undo_returns_to_human_turn() {
        let config = GameConfig {
            board_size: 9,
            black: PlayerKind::Human,
            white: PlayerKind::Computer(Difficulty::Easy),
        };
        let mut game = GameState::new(config).unwrap();
        game.try_place_stone(Pos::new(4, 4)).unwrap();
        while game.current_turn == Stone::White {
            game.step_ai();
        }
        game.undo();
        assert!(game.board.is_board_empty());
        assert_eq!(game.current_turn, Stone::Black);
        assert!(game.move_history.is_empty());
    }

    #[test]
    fn test_failed_setup_is_not_retried() {
        let config = GameConfig {
            board_size: 9,
            black: PlayerKind::Computer(Difficulty::Easy),
            white: PlayerKind::Human,
        };
        let mut game = GameState::new(config).unwrap();
        // Full board without any five: nothing left to search
        for row in 0..9u8 {
            for col in 0..9u8 {
                let stone = if (col / 2 + row) % 2 == 0 { Stone::Black } else { Stone::White };
                game.board.place_stone(Pos::new(row, col), stone);
            }
        }
        assert!(game.is_ai_turn());

        game.step_ai();
        assert!(game.message.as_deref().is_some_and(|m| m.starts_with("AI error")));
        assert!(!game.is_ai_thinking());

        game.message = None;
        game.step_ai();
        assert_eq!(game.message, None, "second frame must not set up again");

        game.reset();
        game.step_ai();
        assert_eq!(game.board.stone_count(), 1, "a new game searches again");
    }

    #[test]
    fn test_apply_config_resizes() {
        let mut game = GameState::new(human_vs_human()).unwrap();
        game.try_place_stone(Pos::new(1, 1)).unwrap();
        let bigger = GameConfig {
            board_size: 19,
            ..human_vs_human()
        };
        game.apply_config(bigger).unwrap();
        assert_eq!(game.board.size(), 19);
        assert!(game.board.is_board_empty());
    }
}
