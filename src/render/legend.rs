//! Level legend and court statistics strip below the grid.

use super::canvas::Canvas;
use super::text::TextRenderer;
use super::{BORDER_COLOR, CANVAS_WIDTH, TEXT_SIZE_LABEL, TEXT_SIZE_SMALL};
use crate::models::{LevelCounts, SkillLevel};

/// Top of the legend strip.
pub const LEGEND_Y: i32 = 680;

const SWATCH_WIDTH: u32 = 30;
const SWATCH_HEIGHT: u32 = 20;
const SWATCH_SPACING: i32 = 200;
const SWATCH_LEFT: i32 = 50;
const LABEL_OFFSET_X: i32 = 40;
const LABEL_OFFSET_Y: i32 = 3;
const STATS_OFFSET_Y: i32 = 40;

/// Draws one swatch and label per level, then the stats line.
pub fn draw_legend(canvas: &mut Canvas, text: &TextRenderer, counts: &LevelCounts) {
    for (i, level) in SkillLevel::ALL.into_iter().enumerate() {
        let x = SWATCH_LEFT + i as i32 * SWATCH_SPACING;
        canvas.fill_rect(x, LEGEND_Y, SWATCH_WIDTH, SWATCH_HEIGHT, level.color());
        canvas.stroke_rect(x, LEGEND_Y, SWATCH_WIDTH, SWATCH_HEIGHT, BORDER_COLOR, 1);
        text.draw(
            canvas,
            x + LABEL_OFFSET_X,
            LEGEND_Y + LABEL_OFFSET_Y,
            level.title(),
            TEXT_SIZE_LABEL,
            BORDER_COLOR,
        );
    }

    text.draw_centered(
        canvas,
        CANVAS_WIDTH as i32 / 2,
        LEGEND_Y + STATS_OFFSET_Y,
        &stats_line(counts),
        TEXT_SIZE_SMALL,
        BORDER_COLOR,
    );
}

/// `Total: N | Beginner: a | Intermediate: b | Advanced: c`
#[must_use]
pub fn stats_line(counts: &LevelCounts) -> String {
    let levels: Vec<String> = SkillLevel::ALL
        .into_iter()
        .map(|level| format!("{}: {}", level.title(), counts.get(level)))
        .collect();
    format!("Total: {} | {}", counts.total(), levels.join(" | "))
}
