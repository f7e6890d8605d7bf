//! Theme constants for the GUI

use egui::Color32;

// Board colors - paper and ink
pub const BOARD_BG: Color32 = Color32::from_rgb(238, 232, 213);
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 55, 50);
pub const COORD_LABEL: Color32 = Color32::from_rgb(120, 110, 95);

// Marks
pub const X_MARK: Color32 = Color32::from_rgb(200, 60, 60);
pub const O_MARK: Color32 = Color32::from_rgb(50, 100, 190);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(240, 170, 40);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 200, 80);

pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 70)
}

pub fn suggestion_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(50, 200, 80, 50)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const BUTTON_BG: Color32 = Color32::from_rgb(50, 53, 58);
pub const BOARD_AREA_BG: Color32 = Color32::from_rgb(40, 42, 46);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const STATUS_OK: Color32 = Color32::from_rgb(80, 200, 120);
pub const STATUS_BUSY: Color32 = Color32::from_rgb(255, 180, 50);
pub const STATUS_SLOW: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 28.0;
pub const MARK_RADIUS_RATIO: f32 = 0.32;
pub const MARK_STROKE_RATIO: f32 = 0.08;
pub const GRID_LINE_WIDTH: f32 = 2.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 5.0;

/// Display color for a side
pub fn mark_color(mark: crate::Mark) -> Color32 {
    match mark {
        crate::Mark::X => X_MARK,
        crate::Mark::O => O_MARK,
        crate::Mark::Empty => TEXT_MUTED,
    }
}
