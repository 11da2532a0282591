//! Text drawing: scalable system fonts with a built-in bitmap fallback.

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use anyhow::{Context, Result};
use fontdb::{Database, Family, Query};
use std::path::Path;
use tracing::{debug, warn};

use super::canvas::Canvas;
use crate::models::RgbColor;

/// Families tried, in order, when looking for a system font.
const PREFERRED_FAMILIES: [Family<'static>; 3] = [
    Family::Name("DejaVu Sans"),
    Family::Name("Arial"),
    Family::SansSerif,
];

/// Glyph cell of the bitmap font, before scaling.
const BITMAP_WIDTH: i32 = 5;
const BITMAP_HEIGHT: i32 = 7;
const BITMAP_ADVANCE: i32 = 6;

/// Draws text onto a [`Canvas`].
pub enum TextRenderer {
    /// Outline font rendered with anti-aliasing
    Scalable(FontVec),
    /// Built-in 5x7 pixel font, scaled by whole pixels
    Bitmap,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalable(_) => f.write_str("TextRenderer::Scalable"),
            Self::Bitmap => f.write_str("TextRenderer::Bitmap"),
        }
    }
}

impl TextRenderer {
    /// Picks the best available font.
    ///
    /// Order: the configured font file, then a sans-serif system font, then
    /// the bitmap font. Failures along the way are logged, never returned.
    #[must_use]
    pub fn discover(font_path: Option<&Path>) -> Self {
        if let Some(path) = font_path {
            match Self::from_file(path) {
                Ok(renderer) => return renderer,
                Err(err) => warn!("Ignoring configured font: {err:#}"),
            }
        }

        if let Some(renderer) = Self::system() {
            return renderer;
        }

        warn!("No scalable font found, falling back to the bitmap font");
        Self::Bitmap
    }

    /// Loads a TrueType/OpenType font file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;
        let font = FontVec::try_from_vec(data)
            .with_context(|| format!("Invalid font file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded font file");
        Ok(Self::Scalable(font))
    }

    /// Looks up a sans-serif font among the installed system fonts.
    #[must_use]
    pub fn system() -> Option<Self> {
        let mut db = Database::new();
        db.load_system_fonts();

        let query = Query {
            families: &PREFERRED_FAMILIES,
            ..Query::default()
        };
        let id = db.query(&query)?;
        let font = db
            .with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
            })
            .flatten()?;

        debug!(font = ?db.face(id).map(|face| face.post_script_name.clone()), "using system font");
        Some(Self::Scalable(font))
    }

    /// The built-in bitmap font; output does not depend on installed fonts.
    #[must_use]
    pub const fn bitmap() -> Self {
        Self::Bitmap
    }

    /// Rendered width of `text` at `size` pixels.
    #[must_use]
    pub fn measure(&self, text: &str, size: f32) -> i32 {
        match self {
            Self::Scalable(font) => {
                let scaled = font.as_scaled(PxScale::from(size));
                let mut width = 0.0;
                let mut previous: Option<GlyphId> = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = previous {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    previous = Some(id);
                }
                width.ceil() as i32
            }
            Self::Bitmap => {
                let count = text.chars().count() as i32;
                if count == 0 {
                    0
                } else {
                    (count * BITMAP_ADVANCE - 1) * bitmap_scale(size)
                }
            }
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str, size: f32, color: RgbColor) {
        match self {
            Self::Scalable(font) => draw_outlined(font, canvas, x, y, text, size, color),
            Self::Bitmap => draw_bitmap(canvas, x, y, text, size, color),
        }
    }

    /// Draws `text` horizontally centred on `center_x`, top edge at `y`.
    pub fn draw_centered(
        &self,
        canvas: &mut Canvas,
        center_x: i32,
        y: i32,
        text: &str,
        size: f32,
        color: RgbColor,
    ) {
        let width = self.measure(text, size);
        self.draw(canvas, center_x - width / 2, y, text, size, color);
    }
}

fn draw_outlined(
    font: &FontVec,
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    text: &str,
    size: f32,
    color: RgbColor,
) {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let baseline = y as f32 + scaled.ascent();

    let mut caret = x as f32;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| {
                canvas.blend_pixel(left + gx as i32, top + gy as i32, color, coverage);
            });
        }
    }
}

fn bitmap_scale(size: f32) -> i32 {
    ((size / 9.0).round() as i32).max(1)
}

fn draw_bitmap(canvas: &mut Canvas, x: i32, y: i32, text: &str, size: f32, color: RgbColor) {
    let scale = bitmap_scale(size);
    let mut caret = x;
    for ch in text.chars() {
        let rows = bitmap_glyph(ch);
        for (row, bits) in (0..BITMAP_HEIGHT).zip(rows) {
            for col in 0..BITMAP_WIDTH {
                if bits & (0x10 >> col) != 0 {
                    canvas.fill_rect(
                        caret + col * scale,
                        y + row * scale,
                        scale as u32,
                        scale as u32,
                        color,
                    );
                }
            }
        }
        caret += BITMAP_ADVANCE * scale;
    }
}

/// 5x7 glyph rows, most significant of the low five bits on the left.
/// Lowercase letters share the uppercase shapes.
#[allow(clippy::too_many_lines)]
const fn bitmap_glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '|' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '\'' => [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: RgbColor = RgbColor::new(255, 255, 255);
    const BLACK: RgbColor = RgbColor::new(0, 0, 0);

    #[test]
    fn test_bitmap_measure() {
        let text = TextRenderer::bitmap();
        assert_eq!(text.measure("", 18.0), 0);
        // Two glyphs at scale 2: 5 + 1 + 5 columns
        assert_eq!(text.measure("AB", 18.0), 22);
        assert_eq!(text.measure("AB", 8.0), 11);
    }

    #[test]
    fn test_bitmap_draw_marks_pixels() {
        let text = TextRenderer::bitmap();
        let mut canvas = Canvas::new(40, 20, WHITE);
        text.draw(&mut canvas, 1, 1, "I", 9.0, BLACK);

        let image = canvas.into_image();
        // Top bar of "I" spans columns 1..4 of the glyph
        assert_eq!(*image.get_pixel(2, 1), BLACK.to_pixel());
        assert_eq!(*image.get_pixel(1, 1), WHITE.to_pixel());
        // Stem
        assert_eq!(*image.get_pixel(3, 4), BLACK.to_pixel());
    }

    #[test]
    fn test_draw_centered_stays_inside_canvas() {
        let text = TextRenderer::bitmap();
        let mut canvas = Canvas::new(100, 20, WHITE);
        text.draw_centered(&mut canvas, 50, 2, "Court", 9.0, BLACK);

        let image = canvas.into_image();
        let dark: Vec<u32> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == BLACK.to_pixel())
            .map(|(x, _, _)| x)
            .collect();
        let (min, max) = (dark.iter().min().unwrap(), dark.iter().max().unwrap());
        // "Court" is 29 px wide: centred on 50 it starts at 36
        assert_eq!(*min, 36);
        assert!(*max < 65);
    }

    #[test]
    fn test_missing_font_file_falls_back() {
        let renderer = TextRenderer::discover(Some(Path::new("/nonexistent/font.ttf")));
        // Either a system font or the bitmap font, but never a panic
        assert!(renderer.measure("Court", 14.0) > 0);
        assert!(TextRenderer::from_file(Path::new("/nonexistent/font.ttf")).is_err());
    }
}
