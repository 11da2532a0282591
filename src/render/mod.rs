//! Court layout rendering.
//!
//! Produces a fixed-size 1200x800 picture of the court grid: title, one cell
//! per grid position, a level legend and a statistics line. Rendering is a pure
//! function of the layout, the view mode and the font; identical inputs give
//! byte-identical PNG output.

pub mod canvas;
pub mod court_grid;
pub mod legend;
pub mod text;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbImage};
use serde::{Deserialize, Serialize};

use crate::models::{CourtLayout, RgbColor};
pub use canvas::Canvas;
pub use text::TextRenderer;

/// Output width in pixels.
pub const CANVAS_WIDTH: u32 = 1200;
/// Output height in pixels.
pub const CANVAS_HEIGHT: u32 = 800;

const BACKGROUND_COLOR: RgbColor = RgbColor::new(0xf8, 0xf9, 0xfa);
const BORDER_COLOR: RgbColor = RgbColor::new(0x34, 0x3a, 0x40);
const TEXT_COLOR: RgbColor = RgbColor::new(0xff, 0xff, 0xff);

const TEXT_SIZE_TITLE: f32 = 24.0;
const TEXT_SIZE_LABEL: f32 = 18.0;
const TEXT_SIZE_SMALL: f32 = 14.0;
const TITLE_Y: i32 = 20;

/// How empty cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Plain picture for sharing
    #[default]
    Preview,
    /// Empty cells carry a "+" marker
    Edit,
}

impl ViewMode {
    /// `Edit` when `edit` is set.
    #[must_use]
    pub const fn from_edit_flag(edit: bool) -> Self {
        if edit {
            Self::Edit
        } else {
            Self::Preview
        }
    }
}

/// Renders the layout into an RGB image.
#[must_use]
pub fn render_layout(layout: &CourtLayout, mode: ViewMode, text: &TextRenderer) -> RgbImage {
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND_COLOR);

    text.draw_centered(
        &mut canvas,
        CANVAS_WIDTH as i32 / 2,
        TITLE_Y,
        &layout.layout_settings.center_name,
        TEXT_SIZE_TITLE,
        BORDER_COLOR,
    );
    court_grid::draw_grid(&mut canvas, text, layout, mode);
    legend::draw_legend(&mut canvas, text, &layout.level_counts());

    canvas.into_image()
}

/// Encodes an image as PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)
        .context("Failed to encode PNG")?;
    Ok(bytes)
}

/// Renders and encodes in one step.
pub fn render_png(layout: &CourtLayout, mode: ViewMode, text: &TextRenderer) -> Result<Vec<u8>> {
    encode_png(&render_layout(layout, mode, text))
}

/// Suggested download name, e.g. `court_layout_20240902_190000.png`.
#[must_use]
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("court_layout_{}.png", now.format("%Y%m%d_%H%M%S"))
}

/// [`export_filename`] for the current time.
#[must_use]
pub fn default_export_filename() -> String {
    export_filename(Local::now())
}

#[cfg(test)]
mod tests {
    use super::court_grid::cell_origin;
    use super::*;
    use crate::models::{GridPosition, LayoutSettings, SkillLevel};
    use chrono::TimeZone;

    fn pixel(image: &RgbImage, x: i32, y: i32) -> RgbColor {
        RgbColor::from(*image.get_pixel(x as u32, y as u32))
    }

    #[test]
    fn test_render_dimensions() {
        let image = render_layout(&CourtLayout::seed(), ViewMode::Preview, &TextRenderer::bitmap());
        assert_eq!(image.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(pixel(&image, 5, 5), BACKGROUND_COLOR);
    }

    #[test]
    fn test_render_is_deterministic() {
        let layout = CourtLayout::seed();
        let text = TextRenderer::bitmap();
        let first = render_png(&layout, ViewMode::Edit, &text).unwrap();
        let second = render_png(&layout, ViewMode::Edit, &text).unwrap();
        assert_eq!(first, second);
        assert_eq!(&first[1..4], b"PNG");
    }

    #[test]
    fn test_occupied_cells_use_level_colors() {
        let layout = CourtLayout::seed();
        let image = render_layout(&layout, ViewMode::Preview, &TextRenderer::bitmap());

        for court in layout.active_courts() {
            let (x, y) = cell_origin(court.position.row, court.position.col, 4);
            assert_eq!(pixel(&image, x + 8, y + 92), court.level.color(), "{}", court.name);
            // Border
            assert_eq!(pixel(&image, x + 1, y + 1), BORDER_COLOR);
        }
    }

    #[test]
    fn test_empty_cells_and_edit_marker() {
        let layout = CourtLayout::seed();
        let text = TextRenderer::bitmap();
        let preview = render_layout(&layout, ViewMode::Preview, &text);
        let edit = render_layout(&layout, ViewMode::Edit, &text);

        // (0, 2) is empty in the seed layout
        let (x, y) = cell_origin(0, 2, 4);
        let empty = RgbColor::new(0xe9, 0xec, 0xef);
        assert_eq!(pixel(&preview, x + 8, y + 8), empty);
        assert_eq!(pixel(&preview, x + 80, y + 50), empty);
        assert_eq!(pixel(&edit, x + 80, y + 50), RgbColor::new(0x6c, 0x75, 0x7d));
        assert_eq!(pixel(&edit, x + 8, y + 8), empty);
    }

    #[test]
    fn test_courts_outside_grid_are_skipped() {
        let mut layout = CourtLayout::new(LayoutSettings {
            rows: 1,
            cols: 2,
            ..LayoutSettings::default()
        });
        layout.courts.push(crate::models::Court::new(
            1,
            "Far Court",
            SkillLevel::Advanced,
            GridPosition::new(5, 5),
        ));

        let image = render_layout(&layout, ViewMode::Preview, &TextRenderer::bitmap());
        let advanced = SkillLevel::Advanced.color();
        // Only the legend swatch carries the advanced colour
        let count = image
            .pixels()
            .filter(|p| RgbColor::from(**p) == advanced)
            .count();
        assert_eq!(count, 28 * 18);
    }

    #[test]
    fn test_inactive_courts_render_as_empty() {
        let mut layout = CourtLayout::seed();
        layout.find_mut(1).unwrap().active = false;
        let image = render_layout(&layout, ViewMode::Preview, &TextRenderer::bitmap());

        let (x, y) = cell_origin(0, 0, 4);
        assert_eq!(pixel(&image, x + 8, y + 92), RgbColor::new(0xe9, 0xec, 0xef));
    }

    #[test]
    fn test_export_filename() {
        let when = Local.with_ymd_and_hms(2024, 9, 2, 19, 5, 7).unwrap();
        assert_eq!(export_filename(when), "court_layout_20240902_190507.png");
        assert!(default_export_filename().starts_with("court_layout_"));
    }

    #[test]
    fn test_view_mode_from_flag() {
        assert_eq!(ViewMode::from_edit_flag(true), ViewMode::Edit);
        assert_eq!(ViewMode::from_edit_flag(false), ViewMode::Preview);
    }
}
