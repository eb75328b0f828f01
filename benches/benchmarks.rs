//! Performance benchmarks for the slider hot paths.
//!
//! Measures:
//! - Gradient color lookup across the whole domain
//! - Drag resolution against neighbors
//! - A full simulated drag gesture

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gradient_range::gradient::Gradient;
use gradient_range::positioner::{TrackBox, resolve_drag};
use gradient_range::{RangeSlider, SliderConfig};

/// Benchmark color lookup for every integer value of the default domain.
fn bench_color_at(c: &mut Criterion) {
    let gradient = Gradient::default();

    c.bench_function("color_at_0_to_100", |b| {
        b.iter(|| {
            for v in 0..=100 {
                black_box(gradient.color_at(black_box(v as f64)).ok());
            }
        })
    });
}

/// Benchmark neighbor clamping with eight thumbs.
fn bench_resolve_drag(c: &mut Criterion) {
    let thumbs: Vec<f64> = (0..8).map(|i| i as f64 * 12.0).collect();

    c.bench_function("resolve_drag_8_thumbs", |b| {
        b.iter(|| {
            for i in 0..thumbs.len() {
                black_box(resolve_drag(&thumbs, i, 5.0, black_box(50.0)).ok());
            }
        })
    });
}

/// Benchmark a 200-event drag across a 400px track.
fn bench_drag_gesture(c: &mut Criterion) {
    let track = TrackBox::new(0.0, 400.0);

    c.bench_function("drag_gesture_200_moves", |b| {
        b.iter(|| {
            let mut slider =
                RangeSlider::new(SliderConfig::default(), Gradient::default(), vec![0.0, 100.0])
                    .expect("default slider");
            slider.pointer_down(0).expect("thumb 0");
            for step in 0..200 {
                black_box(slider.pointer_move(step as f64 * 2.0, track).ok());
            }
            slider.pointer_up();
            black_box(slider.thumbs()[0])
        })
    });
}

criterion_group!(
    benches,
    bench_color_at,
    bench_resolve_drag,
    bench_drag_gesture
);
criterion_main!(benches);
