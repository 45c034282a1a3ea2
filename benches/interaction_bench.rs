use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use partview::camera::OrbitCameraController;
use partview::input::{GestureClassifier, PointerId, PointerSample};
use partview::options::{CameraOptions, GestureOptions};
use partview::util::easing::EasingFunction;
use partview::util::smoothing::{smooth_damp, smooth_damp_angle};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::QuintOut;
    c.bench_function("quint_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn smoothing_benchmark(c: &mut Criterion) {
    c.bench_function("smooth_damp", |b| {
        let mut velocity = 0.0;
        b.iter(|| {
            black_box(smooth_damp(
                black_box(10.0),
                black_box(40.0),
                &mut velocity,
                0.08,
                1.0 / 60.0,
            ))
        })
    });
    c.bench_function("smooth_damp_angle", |b| {
        let mut velocity = 0.0;
        b.iter(|| {
            black_box(smooth_damp_angle(
                black_box(350.0),
                black_box(370.0),
                &mut velocity,
                0.08,
                1.0 / 60.0,
            ))
        })
    });
}

fn orbit_benchmark(c: &mut Criterion) {
    let mut camera = OrbitCameraController::new(CameraOptions::default());
    c.bench_function("orbit_drag_and_advance", |b| {
        b.iter(|| {
            camera.apply_drag(black_box(3.0), black_box(-2.0));
            camera.apply_pinch(black_box(1.5));
            black_box(camera.advance(1.0 / 60.0))
        })
    });
}

fn gesture_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_session");

    for moves in [4usize, 16, 64] {
        group.bench_function(format!("{moves}_moves"), |b| {
            let mut classifier = GestureClassifier::new(GestureOptions::default());
            let id = PointerId(0);
            b.iter(|| {
                classifier.on_pointer_down(id, PointerSample::new(Vec2::ZERO, 0.0));
                for i in 0..moves {
                    let t = i as f64 * 0.001;
                    classifier.on_pointer_move(
                        id,
                        PointerSample::new(Vec2::new(i as f32 * 0.1, 0.0), t),
                    );
                }
                black_box(classifier.on_pointer_up(
                    id,
                    PointerSample::new(Vec2::new(1.0, 0.0), 0.1),
                ))
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    easing_benchmark,
    smoothing_benchmark,
    orbit_benchmark,
    gesture_benchmark
);
criterion_main!(benches);
