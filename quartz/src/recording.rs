//! An engine that records what it is asked to do.
//!
//! `RecordingEngine` keeps the native state an engine like Cairo keeps (a
//! save stack of transform and stroke attributes, and a path with a current
//! point) without rasterizing anything. It logs every stack, geometry and
//! draw call, and can be told to refuse the next `save` or `restore`, which
//! real engines only do under memory pressure.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use kurbo::{Affine, Point, Vec2};

use crate::{defaults, Color, Engine, EngineError, LineCap, LineDash, LineJoin};

/// Failures reported by a [`RecordingEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordingError {
    #[error("save refused")]
    SaveRefused,
    #[error("restore refused")]
    RestoreRefused,
    #[error("restore with empty native stack")]
    InvalidRestore,
    #[error("invalid matrix")]
    InvalidMatrix,
}

/// The pattern type of [`RecordingEngine`].
///
/// Every pattern gets a fresh id, so a recomputed pattern is never mistaken
/// for a cached one.
#[derive(Debug, PartialEq)]
pub struct RecordedPattern {
    id: u64,
    color: Color,
}

impl RecordedPattern {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// A call made on a [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Save,
    Restore,
    SetMatrix(Affine),
    Scale(f64, f64),
    Translate(f64, f64),
    Rotate(f64),
    Concat(Affine),
    NewPath,
    ClosePath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CurveTo([f64; 6]),
    Rectangle {
        origin: (f64, f64),
        size: (f64, f64),
    },
    Arc {
        center: (f64, f64),
        radius: f64,
        start: f64,
        end: f64,
        negative: bool,
    },
    Fill {
        pattern: u64,
        alpha: f64,
    },
    Stroke {
        pattern: u64,
        alpha: f64,
    },
    Clip,
}

#[derive(Clone)]
struct NativeState {
    ctm: Affine,
    line_width: f64,
    line_join: LineJoin,
    line_cap: LineCap,
    miter_limit: f64,
    dash: LineDash,
    tolerance: f64,
    antialias: bool,
}

impl Default for NativeState {
    fn default() -> Self {
        NativeState {
            ctm: Affine::IDENTITY,
            line_width: defaults::LINE_WIDTH,
            line_join: LineJoin::Miter,
            line_cap: LineCap::Butt,
            miter_limit: defaults::MITER_LIMIT,
            dash: LineDash::solid(),
            tolerance: defaults::TOLERANCE,
            antialias: true,
        }
    }
}

/// An [`Engine`] that keeps native state and a call log, and draws nothing.
#[derive(Default)]
pub struct RecordingEngine {
    state: NativeState,
    stack: Vec<NativeState>,
    // Device space, like Cairo; converted back through the CTM on read.
    subpath_start: Option<Point>,
    current: Option<Point>,
    calls: Vec<Call>,
    error: Option<RecordingError>,
    refuse_save: bool,
    refuse_restore: bool,
}

impl RecordingEngine {
    pub fn new() -> RecordingEngine {
        RecordingEngine::default()
    }

    /// Make the next `save` fail without pushing.
    pub fn fail_next_save(&mut self) {
        self.refuse_save = true;
    }

    /// Make the next `restore` fail without popping.
    pub fn fail_next_restore(&mut self) {
        self.refuse_restore = true;
    }

    /// The depth of the native save stack.
    pub fn native_depth(&self) -> usize {
        self.stack.len()
    }

    /// Every stack, geometry and draw call made so far, oldest first.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn apply(&mut self, transform: Affine) {
        self.install(self.state.ctm * transform);
    }

    /// Make `ctm` current, or flag it as invalid the way Cairo does.
    fn install(&mut self, ctm: Affine) {
        if is_invertible(ctm) {
            self.state.ctm = ctm;
        } else if self.error.is_none() {
            self.error = Some(RecordingError::InvalidMatrix);
        }
    }

    fn to_device(&self, x: f64, y: f64) -> Point {
        self.state.ctm * Point::new(x, y)
    }

    fn path_move(&mut self, p: Point) {
        self.subpath_start = Some(p);
        self.current = Some(p);
    }

    fn path_line(&mut self, p: Point) {
        if self.current.is_none() {
            self.subpath_start = Some(p);
        }
        self.current = Some(p);
    }

    fn clear_path(&mut self) {
        self.subpath_start = None;
        self.current = None;
    }
}

fn is_invertible(matrix: Affine) -> bool {
    matrix.as_coeffs().iter().all(|c| c.is_finite()) && matrix.determinant() != 0.0
}

impl Engine for RecordingEngine {
    type Pattern = Rc<RecordedPattern>;
    type Font = &'static str;

    fn solid_pattern(color: &Color) -> Self::Pattern {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Rc::new(RecordedPattern {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            color: *color,
        })
    }

    fn status(&self) -> Result<(), EngineError> {
        match self.error {
            Some(err) => Err(EngineError::new(err)),
            None => Ok(()),
        }
    }

    fn save(&mut self) -> Result<(), EngineError> {
        self.calls.push(Call::Save);
        self.status()?;
        if std::mem::take(&mut self.refuse_save) {
            return Err(EngineError::new(RecordingError::SaveRefused));
        }
        self.stack.push(self.state.clone());
        Ok(())
    }

    fn restore(&mut self) -> Result<(), EngineError> {
        self.calls.push(Call::Restore);
        self.status()?;
        if std::mem::take(&mut self.refuse_restore) {
            return Err(EngineError::new(RecordingError::RestoreRefused));
        }
        match self.stack.pop() {
            Some(state) => {
                self.state = state;
                Ok(())
            }
            None => {
                self.error = Some(RecordingError::InvalidRestore);
                self.status()
            }
        }
    }

    fn matrix(&self) -> Affine {
        self.state.ctm
    }

    fn set_matrix(&mut self, matrix: Affine) {
        self.calls.push(Call::SetMatrix(matrix));
        self.install(matrix);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.calls.push(Call::Scale(sx, sy));
        self.apply(Affine::scale_non_uniform(sx, sy));
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.calls.push(Call::Translate(tx, ty));
        self.apply(Affine::translate((tx, ty)));
    }

    fn rotate(&mut self, angle: f64) {
        self.calls.push(Call::Rotate(angle));
        self.apply(Affine::rotate(angle));
    }

    fn concat(&mut self, transform: Affine) {
        self.calls.push(Call::Concat(transform));
        self.apply(transform);
    }

    fn new_path(&mut self) {
        self.calls.push(Call::NewPath);
        self.clear_path();
    }

    fn close_path(&mut self) {
        self.calls.push(Call::ClosePath);
        self.current = self.subpath_start;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::MoveTo(x, y));
        let p = self.to_device(x, y);
        self.path_move(p);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::LineTo(x, y));
        let p = self.to_device(x, y);
        self.path_line(p);
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.calls.push(Call::CurveTo([x1, y1, x2, y2, x3, y3]));
        if self.current.is_none() {
            let p = self.to_device(x1, y1);
            self.path_move(p);
        }
        let p = self.to_device(x3, y3);
        self.path_line(p);
    }

    fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(Call::Rectangle {
            origin: (x, y),
            size: (width, height),
        });
        let p = self.to_device(x, y);
        self.path_move(p);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, negative: bool) {
        self.calls.push(Call::Arc {
            center: (cx, cy),
            radius,
            start,
            end,
            negative,
        });
        let at = |angle: f64| Point::new(cx, cy) + Vec2::from_angle(angle) * radius;
        let first = at(start);
        let first = self.to_device(first.x, first.y);
        self.path_line(first);
        let last = at(end);
        let last = self.to_device(last.x, last.y);
        self.path_line(last);
    }

    fn current_point(&self) -> Option<(f64, f64)> {
        let p = self.state.ctm.inverse() * self.current?;
        Some((p.x, p.y))
    }

    fn line_width(&self) -> f64 {
        self.state.line_width
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn line_join(&self) -> LineJoin {
        self.state.line_join
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    fn line_cap(&self) -> LineCap {
        self.state.line_cap
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn miter_limit(&self) -> f64 {
        self.state.miter_limit
    }

    fn set_miter_limit(&mut self, limit: f64) {
        self.state.miter_limit = limit;
    }

    fn dash(&self) -> LineDash {
        self.state.dash.clone()
    }

    fn set_dash(&mut self, dash: &LineDash) {
        self.state.dash = dash.clone();
    }

    fn tolerance(&self) -> f64 {
        self.state.tolerance
    }

    fn set_tolerance(&mut self, tolerance: f64) {
        self.state.tolerance = tolerance;
    }

    fn antialias(&self) -> bool {
        self.state.antialias
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.state.antialias = enabled;
    }

    fn fill(&mut self, pattern: &Self::Pattern, alpha: f64) {
        self.calls.push(Call::Fill {
            pattern: pattern.id(),
            alpha,
        });
        self.clear_path();
    }

    fn stroke(&mut self, pattern: &Self::Pattern, alpha: f64) {
        self.calls.push(Call::Stroke {
            pattern: pattern.id(),
            alpha,
        });
        self.clear_path();
    }

    fn clip(&mut self) {
        self.calls.push(Call::Clip);
        self.clear_path();
    }
}
