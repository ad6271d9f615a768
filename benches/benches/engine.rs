// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_carousel::{Carousel, CarouselConfig, InputEvent, TraceStep};
use understory_motion::spring::{Spring, SpringConfig};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// A one second swipe to the left followed by two seconds of release.
fn swipe_trace() -> Vec<TraceStep> {
    let mut trace = vec![TraceStep::Input(InputEvent::DragStart { timestamp_ms: 0.0 })];
    let mut t = 0.0;
    for _ in 0..60 {
        t += FRAME_MS;
        trace.push(TraceStep::Input(InputEvent::DragMove {
            delta: -30.0,
            timestamp_ms: t,
        }));
        trace.push(TraceStep::Tick(t));
    }
    trace.push(TraceStep::Input(InputEvent::DragEnd { timestamp_ms: t }));
    for _ in 0..120 {
        t += FRAME_MS;
        trace.push(TraceStep::Tick(t));
    }
    trace
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("engine/tick_dragging", |b| {
        let mut carousel = Carousel::new(CarouselConfig::default()).unwrap();
        carousel.drag_start(0.0);
        let mut t = 0.0;
        b.iter(|| {
            t += FRAME_MS;
            carousel.drag_move(black_box(-4.0), t);
            black_box(carousel.tick(t).translation)
        });
    });

    c.bench_function("engine/tick_idle", |b| {
        let mut carousel = Carousel::new(CarouselConfig::default()).unwrap();
        let mut t = 0.0;
        b.iter(|| {
            t += FRAME_MS;
            black_box(carousel.tick(t).needs_next_frame)
        });
    });
}

fn bench_replay(c: &mut Criterion) {
    let trace = swipe_trace();
    c.bench_function("engine/replay_swipe", |b| {
        b.iter_batched(
            || Carousel::new(CarouselConfig::default()).unwrap(),
            |mut carousel| black_box(carousel.replay(trace.iter().copied()).unwrap().len()),
            BatchSize::SmallInput,
        );
    });
}

fn bench_spring(c: &mut Criterion) {
    c.bench_function("motion/spring_step_dropped_frames", |b| {
        let mut spring = Spring::new(SpringConfig::SMOOTHER);
        let mut target = 1000.0;
        b.iter(|| {
            target = -target;
            spring.set_target(target);
            black_box(spring.step(black_box(0.25)))
        });
    });
}

criterion_group!(benches, bench_tick, bench_replay, bench_spring);
criterion_main!(benches);
