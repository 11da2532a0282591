//! Court cells: occupied courts with markings, empty placeholders.

use super::canvas::Canvas;
use super::text::TextRenderer;
use super::{
    ViewMode, BORDER_COLOR, CANVAS_WIDTH, TEXT_COLOR, TEXT_SIZE_LABEL, TEXT_SIZE_SMALL,
};
use crate::models::{Court, CourtLayout, RgbColor};

/// Cell width in pixels.
pub const CELL_WIDTH: i32 = 160;
/// Cell height in pixels.
pub const CELL_HEIGHT: i32 = 100;
const GAP_X: i32 = 20;
const GAP_Y: i32 = 30;
/// Top of the first grid row.
pub const GRID_TOP: i32 = 80;

const EMPTY_FILL: RgbColor = RgbColor::new(0xe9, 0xec, 0xef);
const EMPTY_OUTLINE: RgbColor = RgbColor::new(0xad, 0xb5, 0xbd);
const ADD_MARKER: RgbColor = RgbColor::new(0x6c, 0x75, 0x7d);

/// Top-left pixel of the cell at `(row, col)` in a grid `cols` wide.
///
/// The grid is centred horizontally; wide grids start left of the canvas.
#[must_use]
pub fn cell_origin(row: u32, col: u32, cols: u32) -> (i32, i32) {
    let cols = cols as i32;
    let grid_width = cols * CELL_WIDTH + (cols - 1) * GAP_X;
    let margin_x = (CANVAS_WIDTH as i32 - grid_width).div_euclid(2);
    (
        margin_x + col as i32 * (CELL_WIDTH + GAP_X),
        GRID_TOP + row as i32 * (CELL_HEIGHT + GAP_Y),
    )
}

/// Draws every cell of the grid.
///
/// Only active courts inside the grid are drawn; courts left outside after a
/// shrink are skipped.
pub fn draw_grid(canvas: &mut Canvas, text: &TextRenderer, layout: &CourtLayout, mode: ViewMode) {
    let settings = &layout.layout_settings;
    for cell in settings.cells() {
        let (x, y) = cell_origin(cell.row, cell.col, settings.cols);
        match layout.court_at(cell) {
            Some(court) => draw_court(canvas, text, court, x, y),
            None => draw_empty(canvas, x, y, mode),
        }
    }
}

fn draw_court(canvas: &mut Canvas, text: &TextRenderer, court: &Court, x: i32, y: i32) {
    let (w, h) = (CELL_WIDTH as u32, CELL_HEIGHT as u32);
    canvas.fill_rect(x, y, w, h, court.level.color());
    canvas.stroke_rect(x, y, w, h, BORDER_COLOR, 3);

    // Net, service lines, centre line
    canvas.hline(x + 10, x + CELL_WIDTH - 10, y + CELL_HEIGHT / 2, TEXT_COLOR, 2);
    canvas.hline(x + 20, x + CELL_WIDTH - 20, y + 30, TEXT_COLOR, 1);
    canvas.hline(x + 20, x + CELL_WIDTH - 20, y + 70, TEXT_COLOR, 1);
    canvas.vline(x + CELL_WIDTH / 2, y + 10, y + CELL_HEIGHT - 10, TEXT_COLOR, 1);

    let center_x = x + CELL_WIDTH / 2;
    text.draw_centered(canvas, center_x, y + 25, &court.name, TEXT_SIZE_LABEL, TEXT_COLOR);
    text.draw_centered(
        canvas,
        center_x,
        y + 50,
        court.level.title(),
        TEXT_SIZE_SMALL,
        TEXT_COLOR,
    );
    text.draw(
        canvas,
        x + 5,
        y + 5,
        &court.id.to_string(),
        TEXT_SIZE_SMALL,
        TEXT_COLOR,
    );
}

fn draw_empty(canvas: &mut Canvas, x: i32, y: i32, mode: ViewMode) {
    let (w, h) = (CELL_WIDTH as u32, CELL_HEIGHT as u32);
    canvas.fill_rect(x, y, w, h, EMPTY_FILL);
    canvas.stroke_rect(x, y, w, h, EMPTY_OUTLINE, 1);

    if mode == ViewMode::Edit {
        let (cx, cy) = (x + CELL_WIDTH / 2, y + CELL_HEIGHT / 2);
        canvas.hline(cx - 20, cx + 20, cy, ADD_MARKER, 3);
        canvas.vline(cx, cy - 20, cy + 20, ADD_MARKER, 3);
    }
}
