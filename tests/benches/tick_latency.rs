//! Cost of the interrupt-side tick and the loop-side render path

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use focus_core::hal::mock::{MockPeriodicSource, MockPin};
use focus_core::{CountdownTimer, DisplayDriver, SegmentDisplay, TimerConfig};

fn bench_tick(c: &mut Criterion) {
    let timer = CountdownTimer::new(MockPeriodicSource::new(), TimerConfig::POMODORO);
    timer.toggle();

    c.bench_function("tick_running", |b| {
        b.iter(|| {
            if timer.snapshot().seconds_remaining == 0 {
                timer.toggle();
                timer.toggle();
            }
            timer.tick();
        })
    });

    c.bench_function("snapshot", |b| b.iter(|| black_box(timer.snapshot())));

    c.bench_function("take_ready", |b| {
        b.iter(|| {
            timer.tick();
            black_box(timer.take_ready())
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut display = DisplayDriver::new(
        SegmentDisplay::new(core::array::from_fn(|_| MockPin::new())),
        SegmentDisplay::with_indicator(core::array::from_fn(|_| MockPin::new()), MockPin::new()),
    );

    c.bench_function("render_minutes_cached", |b| {
        b.iter(|| display.render_minutes(black_box(1499)))
    });

    let mut seconds = 0u32;
    c.bench_function("render_minutes_changing", |b| {
        b.iter(|| {
            seconds = (seconds + 60) % 6_000;
            display.render_minutes(black_box(seconds))
        })
    });
}

criterion_group!(benches, bench_tick, bench_render);
criterion_main!(benches);
