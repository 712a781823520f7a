//! The attributes the rendering engine does not track natively.

use kurbo::Size;

use crate::{Color, TextDrawingMode};

/// A color together with the engine pattern derived from it.
///
/// The pattern is computed once, when the paint is built, and read from
/// here by every draw call that uses it.
#[derive(Clone, Debug)]
pub struct Paint<P> {
    color: Color,
    pattern: P,
}

impl<P> Paint<P> {
    pub fn new(color: Color, make_pattern: impl FnOnce(&Color) -> P) -> Paint<P> {
        let pattern = make_pattern(&color);
        Paint { color, pattern }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pattern(&self) -> &P {
        &self.pattern
    }
}

/// A drop shadow applied to subsequent drawing.
#[derive(Clone, Debug)]
pub struct Shadow<P> {
    /// Offset of the shadow, in base space.
    pub offset: Size,
    /// Blur radius; zero means a hard edge.
    pub blur: f64,
    pub paint: Paint<P>,
}

/// One save level's worth of non-native graphics state.
///
/// `P` is the engine's pattern type and `F` its font type.
#[derive(Clone, Debug)]
pub struct ShadowState<P, F> {
    pub alpha: f64,
    pub fill: Option<Paint<P>>,
    pub stroke: Option<Paint<P>>,
    pub shadow: Option<Shadow<P>>,
    pub font: Option<F>,
    pub font_size: f64,
    pub character_spacing: f64,
    pub text_drawing_mode: TextDrawingMode,
}

impl<P, F> ShadowState<P, F> {
    pub fn new() -> ShadowState<P, F> {
        ShadowState {
            alpha: 1.0,
            fill: None,
            stroke: None,
            shadow: None,
            font: None,
            font_size: 0.0,
            character_spacing: 0.0,
            text_drawing_mode: TextDrawingMode::Fill,
        }
    }
}

impl<P, F> Default for ShadowState<P, F> {
    fn default() -> Self {
        ShadowState::new()
    }
}
