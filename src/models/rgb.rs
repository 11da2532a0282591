//! RGB colors used by the layout renderer.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]

/// RGB color value (0-255 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts the color to an `image` pixel.
    #[must_use]
    pub const fn to_pixel(&self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }

    /// Mixes `self` over `background` with the given coverage (0.0-1.0).
    ///
    /// Used to anti-alias glyph edges onto the canvas.
    #[must_use]
    pub fn blend_over(&self, background: Self, coverage: f32) -> Self {
        let a = coverage.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (f32::from(fg) * a + f32::from(bg) * (1.0 - a)).round() as u8
        };
        Self {
            r: mix(self.r, background.r),
            g: mix(self.g, background.g),
            b: mix(self.b, background.b),
        }
    }
}

impl From<image::Rgb<u8>> for RgbColor {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_over_extremes() {
        let white = RgbColor::new(255, 255, 255);
        let black = RgbColor::new(0, 0, 0);
        assert_eq!(white.blend_over(black, 1.0), white);
        assert_eq!(white.blend_over(black, 0.0), black);
        assert_eq!(white.blend_over(black, 0.5), RgbColor::new(128, 128, 128));
    }

    #[test]
    fn test_pixel_conversion() {
        let color = RgbColor::new(1, 2, 3);
        assert_eq!(RgbColor::from(color.to_pixel()), color);
    }
}
