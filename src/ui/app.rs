//! Main application for the GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};

use super::board_view::{BoardFrame, BoardView};
use super::game_state::{GameMode, GameState};
use super::theme::*;
use crate::rules::Outcome;
use crate::{EngineConfig, Mark, Variant};

/// Main application
pub struct TicTacToeApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
    /// Config overrides loaded at startup, per variant
    configs: [EngineConfig; 2],
}

impl Default for TicTacToeApp {
    fn default() -> Self {
        Self::with_configs(Variant::Classic, Variant::ALL.map(EngineConfig::for_variant))
    }
}

impl TicTacToeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, variant: Variant, configs: [EngineConfig; 2]) -> Self {
        Self::with_configs(variant, configs)
    }

    fn with_configs(variant: Variant, configs: [EngineConfig; 2]) -> Self {
        let config = configs[variant_index(variant)].clone();
        Self {
            state: GameState::with_config(variant, GameMode::default(), config),
            board_view: BoardView::default(),
            show_debug: true,
            configs,
        }
    }

    /// Replace the game, keeping the loaded configs
    fn new_game(&mut self, variant: Variant, mode: GameMode) {
        let config = self.configs[variant_index(variant)].clone();
        self.state = GameState::with_config(variant, mode, config);
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                let variant = self.state.variant();
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (PvE - X)").clicked() {
                        self.new_game(variant, GameMode::PvE { human: Mark::X });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvE - O)").clicked() {
                        self.new_game(variant, GameMode::PvE { human: Mark::O });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(variant, GameMode::PvP);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Board", |ui| {
                    for option in Variant::ALL {
                        if ui.radio(variant == option, option.to_string()).clicked() {
                            self.new_game(option, self.state.mode);
                            ui.close_menu();
                        }
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human } => format!("PvE - You: {}", human.symbol()),
                        GameMode::PvP => "PvP - Hotseat".to_string(),
                    };
                    ui.label(format!("{} | {}", variant, mode_text));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.game_over {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, result);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("X").size(22.0).strong().color(X_MARK));
            ui.label(RichText::new("O").size(22.0).strong().color(O_MARK));
            ui.add_space(4.0);
            ui.label(RichText::new("TIC-TAC-TOE").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            let variant = self.state.variant();
            let subtitle = format!("{} in a row on {}", variant.win_length(), variant);
            ui.label(RichText::new(subtitle).size(11.0).color(TEXT_MUTED));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn;
            ui.horizontal(|ui| {
                ui.label(RichText::new(turn.symbol().to_string()).size(36.0).strong().color(mark_color(turn)));
                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("{} to move", turn.symbol())).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_solver_thinking() {
                        ("Computer thinking...", STATUS_BUSY)
                    } else if self.state.game_over.is_some() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", STATUS_OK)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.solver_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 0.5 {
                    STATUS_OK
                } else if secs < 2.0 {
                    STATUS_BUSY
                } else {
                    STATUS_SLOW
                };
                ui.label(RichText::new(format!("{:.2}s", secs)).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(solver_time) = self.state.move_timer.solver_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last solve: {:.3}s", solver_time.as_secs_f32()))
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
                    .fill(BUTTON_BG)
                    .corner_radius(CornerRadius::same(6))
                    .inner_margin(8.0);

                let button = |ui: &mut egui::Ui, text: &str| {
                    btn_frame
                        .show(ui, |ui| {
                            ui.add(
                                egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY))
                                    .sense(egui::Sense::click()),
                            )
                            .clicked()
                        })
                        .inner
                };

                if button(ui, "Undo (U)") {
                    self.state.undo();
                }
                if button(ui, "Hint (H)") {
                    self.state.request_suggestion();
                }
                if button(ui, "New (N)") {
                    self.state.reset();
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SOLVER DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(result) = &self.state.last_solver_result else {
                ui.label(RichText::new("No search yet").size(10.0).color(TEXT_MUTED));
                return;
            };

            let depth = result
                .max_depth
                .map_or_else(|| "full".to_string(), |d| d.to_string());
            let lines = [
                format!("Score: {}", result.score),
                format!("Depth limit: {depth}"),
                format!("{} nodes in {}ms", result.nodes, result.time_ms),
                format!(
                    "Cutoffs: {}  TT hits: {} ({:.0}%)",
                    result.stats.beta_cutoffs,
                    result.stats.tt_hits,
                    result.stats.tt_hit_rate()
                ),
            ];
            for line in lines {
                ui.label(RichText::new(line).size(10.0).color(TEXT_SECONDARY));
            }

            if let Some(pos) = result.best_move {
                ui.add_space(4.0);
                ui.label(RichText::new(format!("-> {pos}")).size(12.0).strong().color(WIN_HIGHLIGHT));
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: Outcome) {
        let (headline, color) = match result {
            Outcome::Win(side) => (format!("{} WINS!", side.symbol()), mark_color(side)),
            Outcome::Draw => ("DRAW".to_string(), TEXT_PRIMARY),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(20.0).strong().color(color));
                    ui.add_space(12.0);

                    if ui.button(RichText::new("New Game").size(14.0).strong()).clicked() {
                        self.state.reset();
                    }
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

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default()
            .frame(Frame::new().fill(BOARD_AREA_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                let frame = BoardFrame {
                    board: &self.state.board,
                    current_turn: self.state.current_turn,
                    last_move: self.state.last_move,
                    suggested_move: self.state.suggested_move,
                    winning_line: self.state.winning_line,
                    accepts_input: self.state.game_over.is_none() && self.state.is_human_turn(),
                };
                let clicked = self.board_view.show(ui, &frame);

                if let Some(pos) = clicked {
                    if let Err(err) = self.state.try_place(pos) {
                        self.state.message = Some(err.to_string());
                    }
                }
            });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, hint, undo, new) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::H),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
            )
        });

        if debug {
            self.show_debug = !self.show_debug;
        }
        if hint {
            self.state.request_suggestion();
        }
        if undo {
            self.state.undo();
        }
        if new {
            self.state.reset();
        }
    }
}

fn variant_index(variant: Variant) -> usize {
    match variant {
        Variant::Classic => 0,
        Variant::Gomoku => 1,
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_solver_result();

        if self.state.is_solver_turn() && !self.state.is_solver_thinking() && self.state.game_over.is_none() {
            self.state.start_solver();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Keep the timer ticking while the game is live
        if self.state.is_solver_thinking() || self.state.game_over.is_none() {
            ctx.request_repaint();
        }
    }
}
