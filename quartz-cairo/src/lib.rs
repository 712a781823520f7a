//! The Cairo engine for the quartz drawing context.

use std::fmt;

use cairo::{Antialias, Format, ImageSurface, Matrix, SolidPattern, Surface};

use quartz::kurbo::{Affine, Size};
use quartz::{
    defaults, Color, Context, Engine, EngineError, Error, LineCap, LineDash, LineJoin,
};

/// An [`Engine`] drawing through a Cairo context.
///
/// Cairo keeps the transform, path and stroke parameters; the quartz
/// context keeps colors, alpha, shadow and text state on top of it.
pub struct CairoEngine {
    ctx: cairo::Context,
    surface: Surface,
    // The first failure of a draw call; these do not report errors inline.
    err: Result<(), cairo::Error>,
}

#[derive(Debug)]
struct WrappedStatus(cairo::Error);

impl fmt::Display for WrappedStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cairo error: {}", self.0)
    }
}

impl std::error::Error for WrappedStatus {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

trait WrapError<T> {
    fn wrap(self) -> Result<T, EngineError>;
}

impl<T> WrapError<T> for Result<T, cairo::Error> {
    fn wrap(self) -> Result<T, EngineError> {
        self.map_err(|e| EngineError::new(WrappedStatus(e)))
    }
}

impl CairoEngine {
    /// Create a Cairo context drawing to `surface`.
    ///
    /// The line width starts at the CoreGraphics default rather than Cairo's.
    pub fn new<S: AsRef<Surface>>(surface: S) -> Result<CairoEngine, EngineError> {
        let ctx = cairo::Context::new(&surface).wrap()?;
        ctx.set_line_width(defaults::LINE_WIDTH);
        tracing::debug!("cairo engine created");
        Ok(CairoEngine {
            ctx,
            surface: surface.as_ref().clone(),
            err: Ok(()),
        })
    }

    /// Take over an existing Cairo context.
    ///
    /// Saves made on `ctx` before this call are left alone; the quartz
    /// context only ever restores what it saved itself.
    pub fn from_context(ctx: cairo::Context) -> Result<CairoEngine, EngineError> {
        ctx.status().wrap()?;
        let surface = ctx.target();
        Ok(CairoEngine {
            ctx,
            surface,
            err: Ok(()),
        })
    }

    /// The surface this engine draws to.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    fn record(&mut self, result: Result<(), cairo::Error>) {
        if self.err.is_ok() {
            self.err = result;
        }
    }

    /// Paint the current path with `op`, using `pattern` as the source.
    ///
    /// Partial alpha goes through a group so that overlapping strokes do not
    /// accumulate. The group is always popped, even if drawing into it failed.
    fn paint_path(
        &mut self,
        pattern: &SolidPattern,
        alpha: f64,
        op: fn(&cairo::Context) -> Result<(), cairo::Error>,
    ) {
        let result = if alpha >= 1.0 {
            self.ctx.set_source(pattern).and_then(|()| op(&self.ctx))
        } else {
            self.ctx.push_group();
            let drawn = self.ctx.set_source(pattern).and_then(|()| op(&self.ctx));
            let popped = self.ctx.pop_group_to_source();
            drawn
                .and(popped)
                .and_then(|()| self.ctx.paint_with_alpha(alpha))
        };
        self.record(result);
    }
}

/// Create a context drawing to a new ARGB32 image surface.
///
/// `width` and `height` are in logical units; the surface has
/// `width * scale` by `height * scale` pixels and a matching device scale,
/// so the context's transform starts out as the identity.
pub fn image_context(
    width: usize,
    height: usize,
    scale: f64,
) -> Result<Context<CairoEngine>, Error> {
    let pixels = |len: usize| (len as f64 * scale).ceil() as i32;
    let surface = ImageSurface::create(Format::ARgb32, pixels(width), pixels(height)).wrap()?;
    surface.set_device_scale(scale, scale);
    let engine = CairoEngine::new(&surface)?;
    Ok(Context::new(
        engine,
        Size::new(width as f64, height as f64),
        scale,
    ))
}

impl Engine for CairoEngine {
    type Pattern = SolidPattern;
    type Font = cairo::FontFace;

    fn solid_pattern(color: &Color) -> SolidPattern {
        let (r, g, b, a) = color.as_rgba();
        SolidPattern::from_rgba(r, g, b, a)
    }

    fn status(&self) -> Result<(), EngineError> {
        self.err.wrap()?;
        self.ctx.status().wrap()
    }

    fn save(&mut self) -> Result<(), EngineError> {
        self.ctx.save().wrap()
    }

    fn restore(&mut self) -> Result<(), EngineError> {
        self.ctx.restore().wrap()
    }

    fn matrix(&self) -> Affine {
        matrix_to_affine(self.ctx.matrix())
    }

    fn set_matrix(&mut self, matrix: Affine) {
        self.ctx.set_matrix(affine_to_matrix(matrix));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.ctx.scale(sx, sy);
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.ctx.translate(tx, ty);
    }

    fn rotate(&mut self, angle: f64) {
        self.ctx.rotate(angle);
    }

    fn concat(&mut self, transform: Affine) {
        self.ctx.transform(affine_to_matrix(transform));
    }

    fn new_path(&mut self) {
        self.ctx.new_path();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.ctx.curve_to(x1, y1, x2, y2, x3, y3);
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rectangle(x, y, width, height);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, negative: bool) {
        if negative {
            self.ctx.arc_negative(cx, cy, radius, start, end);
        } else {
            self.ctx.arc(cx, cy, radius, start, end);
        }
    }

    fn current_point(&self) -> Option<(f64, f64)> {
        match self.ctx.has_current_point() {
            Ok(true) => self.ctx.current_point().ok(),
            _ => None,
        }
    }

    fn line_width(&self) -> f64 {
        self.ctx.line_width()
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn line_join(&self) -> LineJoin {
        match self.ctx.line_join() {
            cairo::LineJoin::Round => LineJoin::Round,
            cairo::LineJoin::Bevel => LineJoin::Bevel,
            _ => LineJoin::Miter,
        }
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ctx.set_line_join(convert_line_join(join));
    }

    fn line_cap(&self) -> LineCap {
        match self.ctx.line_cap() {
            cairo::LineCap::Round => LineCap::Round,
            cairo::LineCap::Square => LineCap::Square,
            _ => LineCap::Butt,
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(convert_line_cap(cap));
    }

    fn miter_limit(&self) -> f64 {
        self.ctx.miter_limit()
    }

    fn set_miter_limit(&mut self, limit: f64) {
        self.ctx.set_miter_limit(limit);
    }

    fn dash(&self) -> LineDash {
        let (pattern, offset) = self.ctx.dash();
        LineDash { pattern, offset }
    }

    fn set_dash(&mut self, dash: &LineDash) {
        self.ctx.set_dash(&dash.pattern, dash.offset);
    }

    fn tolerance(&self) -> f64 {
        self.ctx.tolerance()
    }

    fn set_tolerance(&mut self, tolerance: f64) {
        self.ctx.set_tolerance(tolerance);
    }

    fn antialias(&self) -> bool {
        self.ctx.antialias() != Antialias::None
    }

    fn set_antialias(&mut self, enabled: bool) {
        let mode = if enabled {
            Antialias::Default
        } else {
            Antialias::None
        };
        self.ctx.set_antialias(mode);
    }

    fn fill(&mut self, pattern: &SolidPattern, alpha: f64) {
        self.ctx.set_fill_rule(cairo::FillRule::Winding);
        self.paint_path(pattern, alpha, cairo::Context::fill);
    }

    fn stroke(&mut self, pattern: &SolidPattern, alpha: f64) {
        self.paint_path(pattern, alpha, cairo::Context::stroke);
    }

    fn clip(&mut self) {
        self.ctx.set_fill_rule(cairo::FillRule::Winding);
        self.ctx.clip();
    }
}

fn convert_line_cap(line_cap: LineCap) -> cairo::LineCap {
    match line_cap {
        LineCap::Butt => cairo::LineCap::Butt,
        LineCap::Round => cairo::LineCap::Round,
        LineCap::Square => cairo::LineCap::Square,
    }
}

fn convert_line_join(line_join: LineJoin) -> cairo::LineJoin {
    match line_join {
        LineJoin::Miter => cairo::LineJoin::Miter,
        LineJoin::Round => cairo::LineJoin::Round,
        LineJoin::Bevel => cairo::LineJoin::Bevel,
    }
}

/// Can't implement `From` here because both types belong to other crates.
fn affine_to_matrix(affine: Affine) -> Matrix {
    let a = affine.as_coeffs();
    Matrix::new(a[0], a[1], a[2], a[3], a[4], a[5])
}

fn matrix_to_affine(matrix: Matrix) -> Affine {
    Affine::new([
        matrix.xx(),
        matrix.yx(),
        matrix.xy(),
        matrix.yy(),
        matrix.x0(),
        matrix.y0(),
    ])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn matrix_conversion_keeps_coefficient_order() {
        let affine = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let matrix = affine_to_matrix(affine);
        assert_eq!(matrix.yx(), 2.0);
        assert_eq!(matrix.xy(), 3.0);
        assert_eq!(matrix.y0(), 6.0);
        assert_eq!(matrix_to_affine(matrix), affine);
    }

    #[test]
    fn line_styles_round_trip() {
        let mut engine =
            CairoEngine::new(ImageSurface::create(Format::ARgb32, 4, 4).unwrap()).unwrap();
        for join in LineJoin::ALL {
            engine.set_line_join(join);
            assert_eq!(engine.line_join(), join);
        }
        for cap in LineCap::ALL {
            engine.set_line_cap(cap);
            assert_eq!(engine.line_cap(), cap);
        }
    }

    #[test]
    fn solid_pattern_carries_color() {
        let pattern = CairoEngine::solid_pattern(&Color::rgba(1.0, 0.0, 0.0, 0.0));
        assert_eq!(pattern.rgba().unwrap(), (1.0, 0.0, 0.0, 0.0));
    }
}
