use std::thread;
use std::time::{Duration, Instant};

use log;

/// Paces a caller-owned render loop at a fixed tick frequency.
///
/// The core never sleeps on its own; loops that want a steady frame
/// rate call [`sleep_until_next_tick`](IntervalTimer::sleep_until_next_tick)
/// after each tick. Late ticks are skipped rather than bunched up.
pub struct IntervalTimer {
    interval: Duration,
    last_tick: Instant,
    measure_fps: bool,
    last_fps_log: Instant,
    frames: u32,
}

impl IntervalTimer {
    pub fn new(freq_hz: f32, measure_fps: bool) -> IntervalTimer {
        let interval_microsec = 1000.0 / freq_hz * 1000.0;

        IntervalTimer {
            interval: Duration::from_micros(interval_microsec as u64),
            last_tick: Instant::now(),
            measure_fps,
            last_fps_log: Instant::now(),
            frames: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn sleep_until_next_tick(&mut self) {
        if self.measure_fps {
            self.update_fps();
        }

        let next_tick = if self.last_tick + self.interval > Instant::now() {
            self.last_tick + self.interval
        } else {
            log::warn!("Render loop skipped a frame");
            Instant::now() + self.interval
        };

        thread::sleep(next_tick - Instant::now());
        self.last_tick = next_tick;
    }

    fn update_fps(&mut self) {
        self.frames += 1;

        if Instant::now() - self.last_fps_log > Duration::from_secs(1) {
            log::debug!("Render loop FPS: {}", self.frames);
            self.frames = 0;
            self.last_fps_log = Instant::now();
        }
    }
}
