//! Main application for the GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, ProgressBar, RichText, SidePanel, TopBottomPanel, Vec2};
use tracing::warn;

use super::board_view::BoardView;
use super::game_state::{GameResult, GameState};
use super::theme::*;
use crate::config::{GameConfig, PlayerKind, PLAYABLE_SIZES};
use crate::rules::GameOutcome;
use crate::Stone;

/// Main application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
    /// Settings being edited in the menu; applied on "New Game"
    pending: GameConfig,
}

impl GomokuApp {
    /// Create the app for a validated configuration
    pub fn new(_cc: &eframe::CreationContext<'_>, state: GameState) -> Self {
        let pending = state.config;
        Self {
            state,
            board_view: BoardView::default(),
            show_debug: true,
            pending,
        }
    }

    fn new_game(&mut self) {
        if let Err(e) = self.state.apply_config(self.pending) {
            warn!(error = %e, "could not apply settings");
            self.state.message = Some(e.to_string());
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (N)").clicked() {
                        self.new_game();
                        ui.close_menu();
                    }
                    if ui.button("Undo (U)").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Settings", |ui| {
                    ui.label(RichText::new("Board size").strong());
                    for size in PLAYABLE_SIZES {
                        ui.radio_value(&mut self.pending.board_size, size, format!("{size} x {size}"));
                    }
                    ui.separator();
                    Self::player_selector(ui, "Black", &mut self.pending.black);
                    ui.separator();
                    Self::player_selector(ui, "White", &mut self.pending.white);
                    ui.separator();
                    if ui.button("Start new game").clicked() {
                        self.new_game();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let n = self.state.board.size();
                    ui.label(format!(
                        "{n}x{n} | Black: {} | White: {}",
                        self.state.config.black, self.state.config.white
                    ));
                });
            });
        });
    }

    fn player_selector(ui: &mut egui::Ui, label: &str, kind: &mut PlayerKind) {
        ui.label(RichText::new(label).strong());
        for option in PlayerKind::options() {
            ui.radio_value(kind, option, option.to_string());
        }
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_players_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.game_over.clone() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &result);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("FIVE IN A ROW").size(20.0).strong().color(TEXT_PRIMARY));
        });
    }

    /// Turn indicator, with the search progress bar on computer turns
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let is_black = self.state.current_turn == Stone::Black;
            let (stone_char, color_name, accent) = if is_black {
                ("●", "BLACK", egui::Color32::from_rgb(70, 70, 75))
            } else {
                ("○", "WHITE", egui::Color32::from_rgb(220, 220, 225))
            };

            ui.horizontal(|ui| {
                let stone_color = if is_black {
                    TEXT_PRIMARY
                } else {
                    egui::Color32::from_rgb(30, 30, 35)
                };

                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    stone_char,
                    egui::FontId::proportional(28.0),
                    stone_color,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(color_name).size(18.0).strong().color(TEXT_PRIMARY));

                    let (status, color) = if self.state.game_over.is_some() {
                        ("Game Over".to_string(), WIN_HIGHLIGHT)
                    } else if let PlayerKind::Computer(d) = self.state.current_player() {
                        (format!("Computer ({d}) thinking..."), TIMER_WARNING)
                    } else {
                        ("Your turn".to_string(), TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status).size(12.0).color(color));
                });
            });

            if let Some(progress) = self.state.ai_progress() {
                ui.add_space(8.0);
                ui.add(
                    ProgressBar::new(f32::from(progress) / 100.0)
                        .show_percentage()
                        .desired_width(ui.available_width()),
                );
            }
        });
    }

    fn render_players_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("PLAYERS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            for (stone, name) in [(Stone::Black, "● Black"), (Stone::White, "○ White")] {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(name).size(12.0).color(TEXT_PRIMARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let kind = self.state.config.player(stone);
                        ui.label(RichText::new(kind.to_string()).size(12.0).color(TEXT_SECONDARY));
                    });
                });
            }
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let secs = self.state.move_timer.elapsed().as_secs_f32();
            let color = if secs < 10.0 {
                TIMER_NORMAL
            } else if secs < 30.0 {
                TIMER_WARNING
            } else {
                TIMER_CRITICAL
            };
            ui.label(RichText::new(format!("{secs:.1}s")).size(24.0).color(color));

            if let Some(last) = self.state.move_timer.last_move_duration {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last move: {:.3}s", last.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn_frame = Frame::new()
                    .fill(egui::Color32::from_rgb(50, 53, 58))
                    .corner_radius(CornerRadius::same(6))
                    .inner_margin(8.0);

                btn_frame.show(ui, |ui| {
                    let label = egui::Label::new(RichText::new("Undo").size(12.0).color(TEXT_PRIMARY));
                    if ui.add(label.sense(egui::Sense::click())).clicked() {
                        self.state.undo();
                    }
                });

                ui.add_space(4.0);

                btn_frame.show(ui, |ui| {
                    let label = egui::Label::new(RichText::new("New Game").size(12.0).color(TEXT_PRIMARY));
                    if ui.add(label.sense(egui::Sense::click())).clicked() {
                        self.new_game();
                    }
                });
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    /// Last computer search: move, score, candidates, nodes, time
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(result) = &self.state.last_ai_result else {
                ui.label(RichText::new("No search yet").size(10.0).color(TEXT_MUTED));
                return;
            };

            let n = self.state.board.size();
            let col = (b'A' + result.best_move.col) as char;
            let row = n - usize::from(result.best_move.row);
            ui.label(RichText::new(format!("-> {col}{row}")).size(12.0).strong().color(WIN_HIGHLIGHT));

            let score = result.score.map_or_else(|| "n/a".to_string(), |s| s.to_string());
            ui.label(RichText::new(format!("Score: {score}")).size(10.0).color(TEXT_SECONDARY));
            ui.label(
                RichText::new(format!("Candidates: {}/{}", result.evaluated, result.candidates))
                    .size(10.0)
                    .color(TEXT_SECONDARY),
            );
            ui.label(
                RichText::new(format!(
                    "{} nodes, {} cutoffs, {}ms",
                    result.nodes, result.stats.cutoffs, result.time_ms
                ))
                .size(10.0)
                .color(TEXT_MUTED),
            );
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        let headline = match result.outcome {
            GameOutcome::Win(Stone::Black) => ("●", "BLACK WINS!"),
            GameOutcome::Win(_) => ("○", "WHITE WINS!"),
            _ => ("●○", "DRAW"),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("GAME OVER")
                            .size(12.0)
                            .color(egui::Color32::from_rgb(180, 255, 180)),
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline.0).size(32.0).color(TEXT_PRIMARY));
                    ui.label(RichText::new(headline.1).size(18.0).strong().color(WIN_HIGHLIGHT));
                    ui.add_space(12.0);

                    Frame::new()
                        .fill(egui::Color32::from_rgb(60, 100, 70))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            let label = egui::Label::new(
                                RichText::new("New Game").size(14.0).strong().color(TEXT_PRIMARY),
                            );
                            if ui.add(label.sense(egui::Sense::click())).clicked() {
                                self.new_game();
                            }
                        });
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let winning_line = self
                .state
                .game_over
                .as_ref()
                .and_then(|r| r.winning_line.clone());

            let clicked = self.board_view.show(
                ui,
                &self.state.board,
                self.state.current_turn,
                self.state.last_move,
                winning_line.as_deref(),
                self.state.is_human_turn(),
            );

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, undo, new_game) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
            )
        });
        if debug {
            self.show_debug = !self.show_debug;
        }
        if undo {
            self.state.undo();
        }
        if new_game {
            self.new_game();
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        // One root candidate per frame keeps the window responsive
        if self.state.is_ai_turn() {
            self.state.step_ai();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_turn() || self.state.game_over.is_none() {
            ctx.request_repaint();
        }
    }
}
