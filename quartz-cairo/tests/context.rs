use quartz::kurbo::{Affine, Point, Rect, Size};
use quartz::{defaults, Color, Error, LineCap, LineDash, LineJoin, TextDrawingMode};
use quartz_cairo::image_context;

fn fill_rgba(ctx: &quartz::Context<quartz_cairo::CairoEngine>) -> (f64, f64, f64, f64) {
    ctx.fill().unwrap().pattern().rgba().unwrap()
}

/// The device scale is carried by the surface, not by the transform.
#[test]
fn initial_transform_is_identity() {
    let ctx = image_context(400, 400, 2.0).unwrap();
    assert_eq!(ctx.ctm(), Affine::IDENTITY);
    assert_eq!(ctx.size(), Size::new(400.0, 400.0));
    assert_eq!(ctx.scale(), 2.0);
    ctx.status().unwrap();
}

#[test]
fn nested_fill_colors_unwind() {
    let mut ctx = image_context(16, 16, 1.0).unwrap();
    ctx.save().unwrap();
    ctx.set_fill_color(Color::rgb(1, 0, 0));
    ctx.save().unwrap();
    ctx.set_fill_color(Color::rgb(0, 1, 0));
    ctx.restore().unwrap();
    assert_eq!(fill_rgba(&ctx), (1.0, 0.0, 0.0, 1.0));
    ctx.restore().unwrap();
    assert_eq!(fill_rgba(&ctx), (0.0, 0.0, 0.0, 1.0));
    assert_eq!(ctx.alpha(), 1.0);
    assert!(matches!(ctx.restore(), Err(Error::InvalidRestore)));
    // The unbalanced restore never reached Cairo, so it is not in error.
    ctx.status().unwrap();
}

#[test]
fn cairo_restores_native_attributes() {
    let mut ctx = image_context(16, 16, 1.0).unwrap();
    let dash = LineDash::new([3.0, 1.0], 0.5);
    ctx.save().unwrap();
    ctx.translate_ctm(5.0, 5.0);
    ctx.set_line_width(3.0);
    ctx.set_line_join(LineJoin::Round);
    ctx.set_line_cap(LineCap::Square);
    ctx.set_miter_limit(2.0);
    ctx.set_line_dash(&dash);
    ctx.set_antialias(false);
    ctx.set_text_drawing_mode(TextDrawingMode::Invisible);
    assert_eq!(ctx.line_dash(), dash);
    assert!(!ctx.antialias());
    ctx.restore().unwrap();

    assert_eq!(ctx.ctm(), Affine::IDENTITY);
    assert_eq!(ctx.line_width(), defaults::LINE_WIDTH);
    assert_eq!(ctx.line_join(), LineJoin::Miter);
    assert_eq!(ctx.line_cap(), LineCap::Butt);
    assert_eq!(ctx.miter_limit(), defaults::MITER_LIMIT);
    assert!(ctx.line_dash().is_solid());
    assert!(ctx.antialias());
    assert_eq!(ctx.text_drawing_mode(), TextDrawingMode::Fill);
}

#[test]
fn translate_and_unit_scale_compose() {
    let mut ctx = image_context(16, 16, 1.0).unwrap();
    ctx.translate_ctm(3.0, 4.0);
    ctx.scale_ctm(1.0, 1.0);
    assert_eq!(ctx.ctm(), Affine::translate((3.0, 4.0)));
    ctx.concat_ctm(Affine::scale(2.0));
    assert_eq!(ctx.ctm(), Affine::translate((3.0, 4.0)) * Affine::scale(2.0));
}

#[test]
fn current_point_needs_open_path() {
    let mut ctx = image_context(16, 16, 1.0).unwrap();
    assert_eq!(ctx.current_point(), None);
    ctx.move_to(Point::new(2.0, 3.0));
    assert_eq!(ctx.current_point(), Some(Point::new(2.0, 3.0)));
    ctx.add_line_to(Point::new(8.0, 3.0));
    ctx.close_path();
    assert_eq!(ctx.current_point(), Some(Point::new(2.0, 3.0)));
    ctx.begin_path();
    assert_eq!(ctx.current_point(), None);
}

#[test]
fn translucent_fill_keeps_stacks_balanced() {
    let mut ctx = image_context(16, 16, 1.0).unwrap();
    ctx.save().unwrap();
    ctx.set_alpha(0.5);
    ctx.set_fill_color(Color::WHITE);
    ctx.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0));
    ctx.add_arc(Point::new(8.0, 8.0), 4.0, 0.0, std::f64::consts::PI, false);
    ctx.stroke_path();
    ctx.restore().unwrap();
    assert_eq!(ctx.state_depth(), 0);
    assert!(matches!(ctx.restore(), Err(Error::InvalidRestore)));
    ctx.status().unwrap();
}

#[test]
fn fill_pattern_is_not_recomputed() {
    let mut ctx = image_context(16, 16, 1.0).unwrap();
    ctx.set_fill_color(Color::rgb(0, 0, 1));
    let first = ctx.fill().unwrap().pattern().to_raw_none();
    let second = ctx.fill().unwrap().pattern().to_raw_none();
    assert_eq!(first, second);
}

#[test]
fn singular_matrix_is_reported_by_status() {
    let mut ctx = image_context(16, 16, 1.0).unwrap();
    ctx.set_ctm(Affine::scale(0.0));
    assert!(matches!(ctx.status(), Err(Error::Engine(_))));
}

#[test]
fn with_save_balances_cairo_stack() {
    let mut ctx = image_context(16, 16, 1.0).unwrap();
    ctx.with_save(|ctx| {
        ctx.rotate_ctm(1.0);
        ctx.set_shadow(Size::new(1.0, 1.0), 2.0);
        ctx.clip();
        Ok(())
    })
    .unwrap();
    assert_eq!(ctx.ctm(), Affine::IDENTITY);
    assert!(ctx.shadow().is_none());
    ctx.status().unwrap();
}

/// Saves already on an adopted Cairo context are not ours to restore.
#[test]
fn adopted_context_keeps_prior_saves() {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 8, 8).unwrap();
    let cr = cairo::Context::new(&surface).unwrap();
    cr.save().unwrap();
    cr.translate(2.0, 2.0);

    let engine = quartz_cairo::CairoEngine::from_context(cr.clone()).unwrap();
    assert_eq!(engine.surface().to_raw_none(), surface.to_raw_none());
    let mut ctx = quartz::Context::new(engine, Size::new(8.0, 8.0), 1.0);
    assert_eq!(ctx.ctm(), Affine::translate((2.0, 2.0)));

    assert!(matches!(ctx.restore(), Err(Error::InvalidRestore)));
    ctx.status().unwrap();
    assert_eq!(ctx.ctm(), Affine::translate((2.0, 2.0)));

    ctx.save().unwrap();
    ctx.scale_ctm(2.0, 2.0);
    ctx.restore().unwrap();
    assert_eq!(ctx.ctm(), Affine::translate((2.0, 2.0)));

    // The caller's own save is still there to be restored.
    cr.restore().unwrap();
    assert_eq!(ctx.ctm(), Affine::IDENTITY);
    ctx.status().unwrap();
}
