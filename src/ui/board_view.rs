//! Board rendering for the GUI

use egui::{CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::rules::WinLine;
use crate::{Board, Mark, Pos};

use super::theme::*;

/// What the board view needs to draw one frame
pub struct BoardFrame<'a> {
    pub board: &'a Board,
    pub current_turn: Mark,
    pub last_move: Option<Pos>,
    pub suggested_move: Option<Pos>,
    pub winning_line: Option<&'a WinLine>,
    pub accepts_input: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    /// Cells per side of the board last drawn
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            board_rect: Rect::NOTHING,
            size: 3,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any
    pub fn show(&mut self, ui: &mut egui::Ui, frame: &BoardFrame<'_>) -> Option<Pos> {
        let available_size = ui.available_size();

        // Calculate board size to fit available space
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.size = frame.board.size();
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / self.size as f32;

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(6), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_coordinates(&painter);

        if let Some(pos) = frame.suggested_move {
            self.draw_suggestion(&painter, pos);
        }

        self.draw_marks(&painter, frame.board);

        if let Some(pos) = frame.last_move {
            self.draw_last_move_marker(&painter, pos);
        }

        if let Some(line) = frame.winning_line {
            self.draw_winning_line(&painter, line);
        }

        // Handle hover preview and click
        let mut clicked_pos = None;

        if frame.accepts_input {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(pos) = self.screen_to_board(pointer_pos) {
                    let is_valid = frame.board.is_empty(pos);
                    self.draw_hover_preview(&painter, pos, frame.current_turn, is_valid);

                    if response.clicked() && is_valid {
                        clicked_pos = Some(pos);
                    }
                }
            }
        }

        clicked_pos
    }

    /// Draw the lines between cells
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = self.size as f32 * self.cell_size;

        for i in 1..self.size {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            // Vertical line
            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + span);
            painter.line_segment([start, end], stroke);

            // Horizontal line
            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + span, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    /// Draw 0-based row and column indices, as typed in the terminal game
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for i in 0..self.size {
            let center = BOARD_MARGIN + (i as f32 + 0.5) * self.cell_size;

            let pos = Pos2::new(self.board_rect.min.x + center, self.board_rect.min.y + BOARD_MARGIN * 0.5);
            painter.text(pos, egui::Align2::CENTER_CENTER, i, font.clone(), COORD_LABEL);

            let pos = Pos2::new(self.board_rect.min.x + BOARD_MARGIN * 0.5, self.board_rect.min.y + center);
            painter.text(pos, egui::Align2::CENTER_CENTER, i, font.clone(), COORD_LABEL);
        }
    }

    fn draw_marks(&self, painter: &Painter, board: &Board) {
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Pos::new(row as u8, col as u8);
                let mark = board.get(pos);
                if mark != Mark::Empty {
                    self.draw_mark(painter, pos, mark, mark_color(mark));
                }
            }
        }
    }

    /// Draw a cross or a ring centred in the cell
    fn draw_mark(&self, painter: &Painter, pos: Pos, mark: Mark, color: egui::Color32) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * MARK_RADIUS_RATIO;
        let stroke = Stroke::new(self.cell_size * MARK_STROKE_RATIO, color);

        match mark {
            Mark::X => {
                let d = Vec2::splat(radius * std::f32::consts::FRAC_1_SQRT_2);
                painter.line_segment([center - d, center + d], stroke);
                let d = Vec2::new(d.x, -d.y);
                painter.line_segment([center - d, center + d], stroke);
            }
            Mark::O => {
                painter.circle_stroke(center, radius, stroke);
            }
            Mark::Empty => {}
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let offset = Vec2::splat(self.cell_size * 0.38);
        let corner = self.board_to_screen(pos) + offset;
        painter.circle_filled(corner, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    /// Strike through the completed line
    fn draw_winning_line(&self, painter: &Painter, line: &WinLine) {
        let stroke = Stroke::new(6.0, WIN_HIGHLIGHT);
        if let (Some(&first), Some(&last)) = (line.cells.first(), line.cells.last()) {
            painter.line_segment([self.board_to_screen(first), self.board_to_screen(last)], stroke);
        }
    }

    fn draw_suggestion(&self, painter: &Painter, pos: Pos) {
        let rect = self.cell_rect(pos).shrink(4.0);
        painter.rect_filled(rect, CornerRadius::same(4), suggestion_fill());
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, turn: Mark, is_valid: bool) {
        let rect = self.cell_rect(pos).shrink(4.0);
        if is_valid {
            painter.rect_filled(rect, CornerRadius::same(4), hover_valid());
            let faded = mark_color(turn).gamma_multiply(0.4);
            self.draw_mark(painter, pos, turn, faded);
        } else {
            painter.rect_filled(rect, CornerRadius::same(4), hover_invalid());
        }
    }

    fn cell_rect(&self, pos: Pos) -> Rect {
        Rect::from_center_size(self.board_to_screen(pos), Vec2::splat(self.cell_size))
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let col = ((relative.x - BOARD_MARGIN) / self.cell_size).floor() as i32;
        let row = ((relative.y - BOARD_MARGIN) / self.cell_size).floor() as i32;

        Pos::is_valid(row, col, self.size).then(|| Pos::new(row as u8, col as u8))
    }

    /// Centre of a cell in screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + (pos.col as f32 + 0.5) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + (pos.row as f32 + 0.5) * self.cell_size;
        Pos2::new(x, y)
    }
}
