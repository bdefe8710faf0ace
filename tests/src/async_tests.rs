//! Sessions driven by a clock instead of by hand

use std::time::Duration as StdDuration;

use focus_core::{RunState, TimerConfig, TimerState, MAX_DURATION_SECONDS};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant};

use crate::{shown_minutes, SimulatedDevice};

/// Tokio task standing in for the tick interrupt: fires once per period while the
/// source runs and reports each attempt back to the loop
fn spawn_ticker(device: &SimulatedDevice, period: StdDuration) -> mpsc::UnboundedReceiver<bool> {
    let timer = device.timer();
    let source = device.source.clone();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;
            let fired = source.is_running();
            if fired {
                timer.tick();
            }
            if tx.send(fired).is_err() {
                break;
            }
        }
    });
    rx
}

#[tokio::test(start_paused = true)]
async fn test_session_runs_for_25_minutes_of_clock_time() {
    println!("🕒 Testing a session on the paused tokio clock...");
    let mut device = SimulatedDevice::new();
    let started = Instant::now();
    let mut ticks = spawn_ticker(&device, StdDuration::from_secs(1));

    assert!(device.press());

    let mut fired = 0;
    while let Some(tick) = ticks.recv().await {
        device.poll();
        if !tick {
            break;
        }
        fired += 1;
    }

    // 1500 decrements plus the tick that found zero and stopped the source
    assert_eq!(fired, MAX_DURATION_SECONDS + 1);
    assert_eq!(started.elapsed(), StdDuration::from_secs(u64::from(MAX_DURATION_SECONDS) + 2));
    assert_eq!(device.snapshot(), TimerState { seconds_remaining: 0, active: true });
    assert_eq!(shown_minutes(&device), (None, Some(1)));

    println!("  ✅ Stopped after {}s of clock time", started.elapsed().as_secs());
}

#[tokio::test(start_paused = true)]
async fn test_pause_freezes_the_clock_driven_session() {
    let mut device = SimulatedDevice::new();
    let mut ticks = spawn_ticker(&device, StdDuration::from_secs(1));

    device.press();
    for _ in 0..120 {
        assert_eq!(ticks.recv().await, Some(true));
        device.poll();
    }
    assert_eq!(shown_minutes(&device), (Some(2), Some(4)));

    assert!(device.press());
    assert_eq!(device.state(), RunState::Idle);

    for _ in 0..600 {
        assert_eq!(ticks.recv().await, Some(false));
        device.poll();
    }
    assert_eq!(device.snapshot().seconds_remaining, MAX_DURATION_SECONDS - 120);
    assert!(!device.indicator());
}

/// Ticks scheduled from the embassy mock clock using the configured tick period
#[test]
fn test_embassy_clock_paces_ticks_at_the_configured_period() {
    use embassy_time::{Duration, Instant, MockDriver};

    let config = TimerConfig::new(1).unwrap();
    let mut device = SimulatedDevice::with_config(config);
    let driver = MockDriver::get();
    let step = Duration::from_millis(250);

    device.press();
    let mut next_tick = Instant::now() + config.tick_period;
    let mut ticks = 0;
    while device.source.is_running() {
        driver.advance(step);
        if Instant::now() >= next_tick {
            next_tick += config.tick_period;
            device.fire_tick();
            ticks += 1;
        }
        device.poll();
    }

    assert_eq!(ticks, 61);
    assert_eq!(device.snapshot(), TimerState { seconds_remaining: 0, active: true });
    assert_eq!(shown_minutes(&device), (None, Some(1)));
}
