//! Progress bar for long sweeps (feature `progress`).
//!
//! [`SweepProgress`] wraps an `indicatif` bar and shows the duration of the last
//! latitude next to a smoothed average, computed by [`IterTimer`] as an exponential
//! moving average `ema ← α·dt + (1−α)·ema`.
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use super::{SweepOutcome, SweepPoint};

pub struct IterTimer {
    last: Instant,
    ema_ns: f64,
    alpha: f64,
    count: u64,
}

impl IterTimer {
    pub fn new(alpha: f64) -> Self {
        Self {
            last: Instant::now(),
            ema_ns: 0.0,
            alpha,
            count: 0,
        }
    }

    /// Duration since the previous tick; the first tick seeds the average.
    #[inline]
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        self.count += 1;

        let dt_ns = dt.as_nanos() as f64;
        self.ema_ns = if self.count == 1 {
            dt_ns
        } else {
            self.alpha * dt_ns + (1.0 - self.alpha) * self.ema_ns
        };

        dt
    }

    #[inline]
    pub fn avg(&self) -> Duration {
        if self.count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.ema_ns as u64)
        }
    }
}

#[inline]
pub fn fmt_dur(d: Duration) -> String {
    let us = d.as_micros();
    if us < 1_000 {
        format!("{us}µs")
    } else {
        let ms = d.as_millis();
        if ms < 1_000 {
            format!("{ms}ms")
        } else {
            let s = d.as_secs_f32();
            format!("{s:.2}s")
        }
    }
}

/// Terminal progress bar fed by the sweep callback.
pub struct SweepProgress {
    bar: ProgressBar,
    timer: IterTimer,
}

impl SweepProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new((total as u64).max(1));
        let style = ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | ETA {eta_precise} | {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(200));

        SweepProgress {
            bar,
            timer: IterTimer::new(0.2),
        }
    }

    /// Advance by one latitude.
    pub fn point_done(&mut self, point: &SweepPoint) {
        let last = self.timer.tick();
        let status = match &point.outcome {
            SweepOutcome::Success(evening) => format!("Odeh={}", evening.odeh.class_code),
            SweepOutcome::NoSunset => "no sunset".to_string(),
        };
        self.bar.set_message(format!(
            "lat={:+} {status} | last: {}, avg: {}",
            point.latitude,
            fmt_dur(last),
            fmt_dur(self.timer.avg())
        ));
        self.bar.inc(1);
    }

    pub fn finish(self) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod progress_test {
    use super::*;

    #[test]
    fn test_fmt_dur() {
        assert_eq!(fmt_dur(Duration::from_micros(253)), "253µs");
        assert_eq!(fmt_dur(Duration::from_millis(42)), "42ms");
        assert_eq!(fmt_dur(Duration::from_millis(3140)), "3.14s");
    }

    #[test]
    fn test_iter_timer_average() {
        let mut timer = IterTimer::new(0.5);
        assert_eq!(timer.avg(), Duration::from_nanos(0));
        let first = timer.tick();
        assert_eq!(timer.avg(), Duration::from_nanos(first.as_nanos() as u64));

        let second = timer.tick();
        let (lo, hi) = (first.min(second), first.max(second));
        assert!(timer.avg() >= lo.saturating_sub(Duration::from_nanos(1)) && timer.avg() <= hi);
    }
}
