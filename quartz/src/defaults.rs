use crate::Color;

/// The default stroke width, in user space units.
pub const LINE_WIDTH: f64 = 1.0;

/// The default miter limit.
pub const MITER_LIMIT: f64 = 10.0;

/// The default flattening tolerance, in device pixels.
pub const TOLERANCE: f64 = 0.1;

/// The alpha of the shadow color used when a shadow is set without a color.
pub const SHADOW_ALPHA: f64 = 1.0 / 3.0;

/// The initial fill and stroke color of a new context.
pub const PAINT_COLOR: Color = Color::BLACK;
