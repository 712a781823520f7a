//! The drawing context.

use kurbo::{Affine, Point, Rect, Size};

use crate::{
    defaults, Color, Engine, Error, LineCap, LineDash, LineJoin, Paint, Shadow, ShadowState,
    TextDrawingMode,
};

/// The attribute state kept by a [`Context`] over engine `E`.
pub type State<E> = ShadowState<<E as Engine>::Pattern, <E as Engine>::Font>;

/// A CoreGraphics-style drawing context.
///
/// Geometry, transforms and stroke attributes go straight to the engine.
/// Colors, shadow, alpha and text attributes live in a [`ShadowState`]
/// owned by the context. `save` and `restore` move both stacks together:
/// the number of saved states here always equals the depth of the engine's
/// own stack when control returns to the caller.
pub struct Context<E: Engine> {
    engine: E,
    size: Size,
    scale: f64,
    state: State<E>,
    saved: Vec<State<E>>,
    text_matrix: Affine,
}

impl<E: Engine> Context<E> {
    /// Wrap an engine.
    ///
    /// `size` is the logical size of the drawing area and `scale` the number
    /// of device pixels per logical unit; both are fixed for the lifetime of
    /// the context. Fill and stroke start out opaque black.
    pub fn new(engine: E, size: Size, scale: f64) -> Context<E> {
        tracing::debug!(width = size.width, height = size.height, scale, "new context");
        let mut state = ShadowState::new();
        state.fill = Some(Paint::new(defaults::PAINT_COLOR, E::solid_pattern));
        state.stroke = Some(Paint::new(defaults::PAINT_COLOR, E::solid_pattern));
        Context {
            engine,
            size,
            scale,
            state,
            saved: Vec::new(),
            text_matrix: Affine::IDENTITY,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Give up the context, returning its engine.
    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The number of outstanding `save` calls.
    pub fn state_depth(&self) -> usize {
        self.saved.len()
    }

    /// Report any error the engine has recorded.
    pub fn status(&self) -> Result<(), Error> {
        Ok(self.engine.status()?)
    }

    /// Push a copy of the entire graphics state.
    ///
    /// If the engine fails to save, nothing is pushed.
    pub fn save(&mut self) -> Result<(), Error> {
        if let Err(e) = self.engine.save() {
            tracing::warn!(depth = self.saved.len(), "engine save failed: {e}");
            return Err(e.into());
        }
        let copy = self.state.clone();
        self.saved.push(std::mem::replace(&mut self.state, copy));
        tracing::trace!(depth = self.saved.len(), "save");
        Ok(())
    }

    /// Pop back to the most recently saved graphics state.
    ///
    /// Fails with [`Error::InvalidRestore`] without touching the engine if
    /// nothing is saved. If the engine fails to restore, nothing is popped.
    pub fn restore(&mut self) -> Result<(), Error> {
        if self.saved.is_empty() {
            tracing::warn!("restore without a matching save");
            return Err(Error::InvalidRestore);
        }
        if let Err(e) = self.engine.restore() {
            tracing::warn!(depth = self.saved.len(), "engine restore failed: {e}");
            return Err(e.into());
        }
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
        tracing::trace!(depth = self.saved.len(), "restore");
        Ok(())
    }

    /// Run `f` inside a `save`/`restore` pair.
    ///
    /// The state is restored whether or not `f` succeeds; the first error
    /// encountered is returned.
    pub fn with_save<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.save()?;
        let result = f(self);
        let restored = self.restore();
        let value = result?;
        restored.map(|_| value)
    }

    /// The current attribute state.
    pub fn state(&self) -> &State<E> {
        &self.state
    }

    pub fn alpha(&self) -> f64 {
        self.state.alpha
    }

    /// Set the global alpha, clamped to `[0, 1]`.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn fill(&self) -> Option<&Paint<E::Pattern>> {
        self.state.fill.as_ref()
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.state.fill = Some(Paint::new(color, E::solid_pattern));
    }

    pub fn stroke(&self) -> Option<&Paint<E::Pattern>> {
        self.state.stroke.as_ref()
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = Some(Paint::new(color, E::solid_pattern));
    }

    pub fn shadow(&self) -> Option<&Shadow<E::Pattern>> {
        self.state.shadow.as_ref()
    }

    /// Enable a shadow in the default color, black at one-third alpha.
    pub fn set_shadow(&mut self, offset: Size, blur: f64) {
        let color = Color::BLACK.with_alpha(defaults::SHADOW_ALPHA);
        self.set_shadow_with_color(offset, blur, color);
    }

    pub fn set_shadow_with_color(&mut self, offset: Size, blur: f64, color: Color) {
        self.state.shadow = Some(Shadow {
            offset,
            blur,
            paint: Paint::new(color, E::solid_pattern),
        });
    }

    pub fn clear_shadow(&mut self) {
        self.state.shadow = None;
    }

    pub fn font(&self) -> Option<&E::Font> {
        self.state.font.as_ref()
    }

    pub fn set_font(&mut self, font: E::Font) {
        self.state.font = Some(font);
    }

    pub fn clear_font(&mut self) {
        self.state.font = None;
    }

    pub fn font_size(&self) -> f64 {
        self.state.font_size
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.state.font_size = size;
    }

    pub fn character_spacing(&self) -> f64 {
        self.state.character_spacing
    }

    pub fn set_character_spacing(&mut self, spacing: f64) {
        self.state.character_spacing = spacing;
    }

    pub fn text_drawing_mode(&self) -> TextDrawingMode {
        self.state.text_drawing_mode
    }

    pub fn set_text_drawing_mode(&mut self, mode: TextDrawingMode) {
        self.state.text_drawing_mode = mode;
    }

    /// The text matrix. Unlike the other text attributes it is not part of
    /// the saved state.
    pub fn text_matrix(&self) -> Affine {
        self.text_matrix
    }

    pub fn set_text_matrix(&mut self, matrix: Affine) {
        self.text_matrix = matrix;
    }

    /// The current transformation matrix.
    pub fn ctm(&self) -> Affine {
        self.engine.matrix()
    }

    /// Replace the current transformation matrix.
    ///
    /// A non-invertible matrix is reported by the engine through `status`.
    pub fn set_ctm(&mut self, matrix: Affine) {
        self.engine.set_matrix(matrix);
    }

    pub fn scale_ctm(&mut self, sx: f64, sy: f64) {
        self.engine.scale(sx, sy);
    }

    pub fn translate_ctm(&mut self, tx: f64, ty: f64) {
        self.engine.translate(tx, ty);
    }

    /// Rotate user space by `angle` radians.
    pub fn rotate_ctm(&mut self, angle: f64) {
        self.engine.rotate(angle);
    }

    /// Apply `transform` to user space before the current matrix.
    pub fn concat_ctm(&mut self, transform: Affine) {
        self.engine.concat(transform);
    }

    /// Discard the current path.
    pub fn begin_path(&mut self) {
        self.engine.new_path();
    }

    pub fn close_path(&mut self) {
        self.engine.close_path();
    }

    pub fn move_to(&mut self, p: Point) {
        self.engine.move_to(p.x, p.y);
    }

    pub fn add_line_to(&mut self, p: Point) {
        self.engine.line_to(p.x, p.y);
    }

    /// Append a cubic Bézier from the current point to `end`.
    pub fn add_curve_to(&mut self, cp1: Point, cp2: Point, end: Point) {
        self.engine
            .curve_to(cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y);
    }

    /// Append `rect` as a closed subpath.
    pub fn add_rect(&mut self, rect: Rect) {
        self.engine
            .rectangle(rect.x0, rect.y0, rect.width(), rect.height());
    }

    /// Append a circular arc, connected to the current point if there is one.
    ///
    /// Angles are in radians; `clockwise` sweeps towards decreasing angles.
    pub fn add_arc(&mut self, center: Point, radius: f64, start: f64, end: f64, clockwise: bool) {
        self.engine
            .arc(center.x, center.y, radius, start, end, clockwise);
    }

    /// The current point, or `None` when no path is open.
    pub fn current_point(&self) -> Option<Point> {
        self.engine.current_point().map(Point::from)
    }

    /// Fill the current path with the fill paint, then discard it.
    pub fn fill_path(&mut self) {
        match self.state.fill {
            Some(ref paint) => self.engine.fill(paint.pattern(), self.state.alpha),
            None => self.engine.new_path(),
        }
    }

    /// Stroke the current path with the stroke paint, then discard it.
    pub fn stroke_path(&mut self) {
        match self.state.stroke {
            Some(ref paint) => self.engine.stroke(paint.pattern(), self.state.alpha),
            None => self.engine.new_path(),
        }
    }

    /// Fill `rect`, discarding any path in progress.
    pub fn fill_rect(&mut self, rect: Rect) {
        self.begin_path();
        self.add_rect(rect);
        self.fill_path();
    }

    /// Stroke `rect`, discarding any path in progress.
    pub fn stroke_rect(&mut self, rect: Rect) {
        self.begin_path();
        self.add_rect(rect);
        self.stroke_path();
    }

    /// Intersect the clip with the current path, then discard it.
    pub fn clip(&mut self) {
        self.engine.clip();
    }

    pub fn antialias(&self) -> bool {
        self.engine.antialias()
    }

    pub fn set_antialias(&mut self, enabled: bool) {
        self.engine.set_antialias(enabled);
    }

    pub fn line_width(&self) -> f64 {
        self.engine.line_width()
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.engine.set_line_width(width);
    }

    pub fn line_join(&self) -> LineJoin {
        self.engine.line_join()
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.engine.set_line_join(join);
    }

    pub fn line_cap(&self) -> LineCap {
        self.engine.line_cap()
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.engine.set_line_cap(cap);
    }

    pub fn miter_limit(&self) -> f64 {
        self.engine.miter_limit()
    }

    pub fn set_miter_limit(&mut self, limit: f64) {
        self.engine.set_miter_limit(limit);
    }

    pub fn line_dash(&self) -> LineDash {
        self.engine.dash()
    }

    pub fn set_line_dash(&mut self, dash: &LineDash) {
        self.engine.set_dash(dash);
    }

    /// The flattening tolerance, in device pixels.
    pub fn tolerance(&self) -> f64 {
        self.engine.tolerance()
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.engine.set_tolerance(tolerance);
    }
}
