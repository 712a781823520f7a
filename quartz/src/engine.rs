//! The interface to the rendering engine.

use kurbo::Affine;

use crate::{Color, EngineError, LineCap, LineDash, LineJoin};

/// An immediate-mode vector engine with its own save/restore stack.
///
/// The context forwards geometry and stroke attributes here and keeps
/// everything else itself. Engine failures are reported through `status`
/// (and, for `save` and `restore`, through their return values); the
/// remaining methods never fail inline.
pub trait Engine {
    /// A paint derived from a color.
    type Pattern: Clone;

    /// An opaque font reference.
    type Font: Clone;

    /// Derive the pattern used to paint with `color`.
    ///
    /// This takes no engine handle: patterns are plain values and can be
    /// built without touching the engine's state.
    fn solid_pattern(color: &Color) -> Self::Pattern;

    /// Report the engine's error status.
    fn status(&self) -> Result<(), EngineError>;

    /// Push the engine's native state, reporting the status after the call.
    ///
    /// On error the native stack must be unchanged.
    fn save(&mut self) -> Result<(), EngineError>;

    /// Pop the engine's native state, reporting the status after the call.
    ///
    /// On error the native stack must be unchanged.
    fn restore(&mut self) -> Result<(), EngineError>;

    fn matrix(&self) -> Affine;
    fn set_matrix(&mut self, matrix: Affine);
    fn scale(&mut self, sx: f64, sy: f64);
    fn translate(&mut self, tx: f64, ty: f64);
    fn rotate(&mut self, angle: f64);
    fn concat(&mut self, transform: Affine);

    fn new_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64);
    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, negative: bool);

    /// The current point in user space, if a path is open.
    fn current_point(&self) -> Option<(f64, f64)>;

    fn line_width(&self) -> f64;
    fn set_line_width(&mut self, width: f64);
    fn line_join(&self) -> LineJoin;
    fn set_line_join(&mut self, join: LineJoin);
    fn line_cap(&self) -> LineCap;
    fn set_line_cap(&mut self, cap: LineCap);
    fn miter_limit(&self) -> f64;
    fn set_miter_limit(&mut self, limit: f64);
    fn dash(&self) -> LineDash;
    fn set_dash(&mut self, dash: &LineDash);
    fn tolerance(&self) -> f64;
    fn set_tolerance(&mut self, tolerance: f64);
    fn antialias(&self) -> bool;
    fn set_antialias(&mut self, enabled: bool);

    /// Fill and consume the current path.
    fn fill(&mut self, pattern: &Self::Pattern, alpha: f64);

    /// Stroke and consume the current path.
    fn stroke(&mut self, pattern: &Self::Pattern, alpha: f64);

    /// Intersect the clip with the current path, consuming it.
    fn clip(&mut self);
}
