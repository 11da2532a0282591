//! Pixel canvas with clipped drawing primitives.

use crate::models::RgbColor;
use image::RgbImage;

/// RGB drawing surface.
///
/// Coordinates are signed so shapes may start off-canvas; every write is
/// clipped to the image bounds.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Creates a canvas filled with `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: RgbColor) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background.to_pixel()),
        }
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Sets one pixel; off-canvas writes are dropped.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: RgbColor) {
        if let Some((x, y)) = self.clip(x, y) {
            self.image.put_pixel(x, y, color.to_pixel());
        }
    }

    /// Mixes `color` into one pixel with the given coverage.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: RgbColor, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        if let Some((x, y)) = self.clip(x, y) {
            let under = RgbColor::from(*self.image.get_pixel(x, y));
            self.image
                .put_pixel(x, y, color.blend_over(under, coverage).to_pixel());
        }
    }

    /// Fills a `width` x `height` rectangle whose top-left corner is `(x, y)`.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: RgbColor) {
        let (x0, x1) = self.span(x, width, self.width());
        let (y0, y1) = self.span(y, height, self.height());
        let pixel = color.to_pixel();
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px, py, pixel);
            }
        }
    }

    /// Draws a rectangle outline `stroke` pixels thick, inside the rectangle.
    pub fn stroke_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: RgbColor,
        stroke: u32,
    ) {
        let stroke = stroke.min(width).min(height);
        if stroke == 0 {
            return;
        }
        let right = x + width as i32 - stroke as i32;
        let bottom = y + height as i32 - stroke as i32;

        self.fill_rect(x, y, width, stroke, color);
        self.fill_rect(x, bottom, width, stroke, color);
        self.fill_rect(x, y, stroke, height, color);
        self.fill_rect(right, y, stroke, height, color);
    }

    /// Horizontal line from `x0` to `x1` (inclusive), `thickness` pixels
    /// tall and centred on `y`.
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: RgbColor, thickness: u32) {
        let (start, end) = (x0.min(x1), x0.max(x1));
        let top = y - (thickness / 2) as i32;
        self.fill_rect(start, top, (end - start + 1) as u32, thickness, color);
    }

    /// Vertical line from `y0` to `y1` (inclusive), `thickness` pixels wide
    /// and centred on `x`.
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, color: RgbColor, thickness: u32) {
        let (start, end) = (y0.min(y1), y0.max(y1));
        let left = x - (thickness / 2) as i32;
        self.fill_rect(left, start, thickness, (end - start + 1) as u32, color);
    }

    /// Consumes the canvas, returning the pixel buffer.
    #[must_use]
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn clip(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.width() && y < self.height()).then_some((x, y))
    }

    /// Clamps `[start, start + len)` to `[0, limit)`.
    fn span(&self, start: i32, len: u32, limit: u32) -> (u32, u32) {
        let begin = i64::from(start).clamp(0, i64::from(limit));
        let end = (i64::from(start) + i64::from(len)).clamp(0, i64::from(limit));
        (begin as u32, end as u32)
    }
}
