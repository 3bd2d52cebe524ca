//! Five-in-a-row
//!
//! Opens the game window by default; `selfplay` runs a computer-only game in
//! the terminal.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gomoku::rules::{check_outcome, GameOutcome};
use gomoku::ui::{GameState, GomokuApp};
use gomoku::{AIEngine, Board, Difficulty, GameConfig, PlayerKind, Stone};

#[derive(Parser)]
#[command(name = "gomoku", version, about = "Five-in-a-row against a minimax opponent")]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Board size (9, 13 or 19)
    #[arg(long, global = true)]
    size: Option<usize>,

    /// Black player: human, easy, medium, hard or impossible
    #[arg(long, global = true)]
    black: Option<PlayerKind>,

    /// White player: human, easy, medium, hard or impossible
    #[arg(long, global = true)]
    white: Option<PlayerKind>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the game window (default)
    Play,
    /// Computer against computer in the terminal
    Selfplay {
        /// Stop after this many moves
        #[arg(long, default_value_t = 400)]
        max_moves: usize,
    },
}

impl Cli {
    /// File settings first, then flags on top
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(black) = self.black {
            config.black = black;
        }
        if let Some(white) = self.white {
            config.white = white;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(config),
        Command::Selfplay { max_moves } => selfplay(config, max_moves),
    }
}

fn play(config: GameConfig) -> anyhow::Result<()> {
    let state = GameState::new(config)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Five in a Row"),
        ..Default::default()
    };

    eframe::run_native(
        "Five in a Row",
        options,
        Box::new(|cc| Ok(Box::new(GomokuApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with an error: {e}"))
}

fn selfplay(config: GameConfig, max_moves: usize) -> anyhow::Result<()> {
    let difficulty = |color: Stone| match config.player(color) {
        PlayerKind::Computer(d) => d,
        PlayerKind::Human => {
            warn!(player = color.name(), "human player replaced by a medium computer");
            Difficulty::Medium
        }
    };
    let mut black = AIEngine::new(difficulty(Stone::Black));
    let mut white = AIEngine::new(difficulty(Stone::White));

    let mut board = Board::new(config.size()?);
    let mut turn = Stone::Black;
    info!(size = board.size(), black = %black.difficulty(), white = %white.difficulty(), "selfplay started");

    for ply in 1..=max_moves {
        let engine = if turn == Stone::Black { &mut black } else { &mut white };
        let count = engine
            .setup(&board, turn)
            .with_context(|| format!("move {ply}: could not start the search"))?;
        for _ in 0..count {
            engine.next_move()?;
        }
        let result = engine.finish()?;
        board = result.board;

        println!(
            "{ply}. {} {} (score {}, {} nodes, {}ms)",
            turn.name(),
            result.best_move,
            result.score.map_or_else(|| "-".to_string(), |s| s.to_string()),
            result.nodes,
            result.time_ms
        );
        println!("{board}");

        match check_outcome(&board) {
            GameOutcome::Win(color) => {
                info!(winner = color.name(), moves = ply, "selfplay finished");
                println!("{} wins", color.name());
                return Ok(());
            }
            GameOutcome::Draw => {
                info!(moves = ply, "selfplay finished in a draw");
                println!("draw");
                return Ok(());
            }
            GameOutcome::NoResult => {}
        }
        turn = turn.opponent();
    }

    bail!("no result after {max_moves} moves")
}
