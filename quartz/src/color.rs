//! A simple representation of color.

/// An opaque RGBA color value.
///
/// The context never interprets colors itself; it only hands them to the
/// engine to derive a pattern. Components are stored as 8-bit values, with
/// red the most significant byte and alpha the least.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(u32);

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgba32(0x00_00_00_ff);

    /// Opaque white.
    pub const WHITE: Color = Color::rgba32(0xff_ff_ff_ff);

    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba32(0);

    /// Create a color from a 32-bit rgba value (alpha as least significant byte).
    pub const fn rgba32(rgba: u32) -> Color {
        Color(rgba)
    }

    /// Create a color from 8-bit components.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color::rgba32(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Create an opaque color from 8-bit components.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Color {
        Color::rgba8(r, g, b, 0xff)
    }

    /// Create a color from four floating point values, each in the range 0.0 to 1.0.
    ///
    /// Out of range values are clamped.
    pub fn rgba(r: impl Into<f64>, g: impl Into<f64>, b: impl Into<f64>, a: impl Into<f64>) -> Color {
        Color::rgba8(
            frac_to_byte(r.into()),
            frac_to_byte(g.into()),
            frac_to_byte(b.into()),
            frac_to_byte(a.into()),
        )
    }

    /// Create an opaque color from three floating point values in the range 0.0 to 1.0.
    pub fn rgb(r: impl Into<f64>, g: impl Into<f64>, b: impl Into<f64>) -> Color {
        Color::rgba(r, g, b, 1.0)
    }

    /// An opaque grey, `0.0` is black and `1.0` is white.
    pub fn grey(level: impl Into<f64>) -> Color {
        let level = level.into();
        Color::rgb(level, level, level)
    }

    /// Change just the alpha value of a color.
    pub fn with_alpha(self, a: impl Into<f64>) -> Color {
        Color::rgba32((self.0 & !0xff) | frac_to_byte(a.into()) as u32)
    }

    /// The 32-bit rgba value.
    pub const fn as_rgba_u32(self) -> u32 {
        self.0
    }

    /// The color as 8-bit `(r, g, b, a)` components.
    pub const fn as_rgba8(self) -> (u8, u8, u8, u8) {
        (
            (self.0 >> 24) as u8,
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
        )
    }

    /// The color as `(r, g, b, a)` fractions in the range 0.0 to 1.0.
    pub fn as_rgba(self) -> (f64, f64, f64, f64) {
        let (r, g, b, a) = self.as_rgba8();
        (
            byte_to_frac(r),
            byte_to_frac(g),
            byte_to_frac(b),
            byte_to_frac(a),
        )
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

fn frac_to_byte(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn byte_to_frac(byte: u8) -> f64 {
    byte as f64 * (1.0 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_constructors_clamp() {
        assert_eq!(Color::rgb(1, 0, 0), Color::rgb8(255, 0, 0));
        assert_eq!(Color::rgba(2.0, -1.0, 0.0, 1.0), Color::rgb8(255, 0, 0));
        assert_eq!(Color::grey(0.0), Color::BLACK);
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let c = Color::rgb8(0x12, 0x34, 0x56).with_alpha(0.0);
        assert_eq!(c.as_rgba8(), (0x12, 0x34, 0x56, 0));
        assert_eq!(Color::BLACK.as_rgba(), (0.0, 0.0, 0.0, 1.0));
    }
}
