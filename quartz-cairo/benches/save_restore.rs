use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quartz::kurbo::{Rect, Size};
use quartz::Color;
use quartz_cairo::image_context;

pub fn bench_save_restore(c: &mut Criterion) {
    for depth in [1, 16, 256] {
        c.bench_function(&format!("save_restore_depth_{}", depth), |b| {
            let mut ctx = image_context(64, 64, 1.0).expect("Can't create context");
            ctx.set_shadow(Size::new(2.0, 2.0), 4.0);
            b.iter(|| {
                for _ in 0..depth {
                    ctx.save().unwrap();
                    ctx.set_fill_color(black_box(Color::WHITE));
                }
                for _ in 0..depth {
                    ctx.restore().unwrap();
                }
            });
        });
    }
}

pub fn bench_fill_rect(c: &mut Criterion) {
    for alpha in [1.0, 0.5] {
        c.bench_function(&format!("fill_rect_alpha_{}", alpha), |b| {
            let mut ctx = image_context(256, 256, 1.0).expect("Can't create context");
            ctx.set_fill_color(Color::rgb8(0x20, 0x40, 0x80));
            ctx.set_alpha(alpha);
            let rect = black_box(Rect::new(16.0, 16.0, 240.0, 240.0));
            b.iter(|| ctx.fill_rect(rect));
        });
    }
}

criterion_group!(benches, bench_save_restore, bench_fill_rect);
criterion_main!(benches);
