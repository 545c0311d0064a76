//! Row progress reporting.
//!
//! * [`IterTimer`] – per-iteration durations smoothed with an **exponential moving
//!   average** (EMA), so the displayed latency is stable even when single cone searches
//!   fluctuate.
//! * [`fmt_dur`] – human-readable duration (`"253µs"`, `"42ms"`, `"3.14s"`).
//! * [`RowProgress`] – one bar increment per processed row, with the last and average
//!   query latency as message. The bar itself needs the `progress` feature; without it
//!   only the timer runs.
//!
//! EMA update rule: `ema ← α·dt + (1–α)·ema`, with `α ∈ (0,1]`. The first tick
//! initializes the average to the first duration.
use std::time::{Duration, Instant};

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::starmags_errors::StarmagsError;

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

    #[inline]
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        self.record(dt);
        dt
    }

    /// Fold an externally measured duration into the average.
    pub fn record(&mut self, dt: Duration) {
        self.count += 1;
        let dt_ns = dt.as_nanos() as f64;
        self.ema_ns = if self.count == 1 {
            dt_ns
        } else {
            self.alpha * dt_ns + (1.0 - self.alpha) * self.ema_ns
        };
    }

    #[inline]
    pub fn avg(&self) -> Duration {
        if self.count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.ema_ns as u64)
        }
    }

    pub fn count(&self) -> u64 {
        self.count
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

/// Progress of the enrichment loop, advanced once per row.
///
/// The bar is cleared from the terminal when the reporter is dropped, so a run aborted by
/// `?` does not leave a half-drawn bar behind.
pub struct RowProgress {
    #[cfg(feature = "progress")]
    bar: Option<ProgressBar>,
    timer: IterTimer,
}

impl RowProgress {
    /// Create the progress reporter.
    ///
    /// Arguments
    /// -----------------
    /// * `total`: Number of rows to process.
    /// * `visible`: Draw a progress bar (ignored without the `progress` feature).
    pub fn new(total: u64, visible: bool) -> Result<Self, StarmagsError> {
        #[cfg(feature = "progress")]
        let bar = if visible {
            let pb = ProgressBar::new(total.max(1));
            pb.set_style(
                ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) \
                 | {per_sec} | ETA {eta_precise} | {msg}",
                )
                .map_err(|e| StarmagsError::InvalidTemplate(e.to_string()))?,
            );
            pb.enable_steady_tick(Duration::from_millis(200));
            Some(pb)
        } else {
            None
        };

        #[cfg(not(feature = "progress"))]
        let _ = (total, visible);

        Ok(RowProgress {
            #[cfg(feature = "progress")]
            bar,
            timer: IterTimer::new(0.2),
        })
    }

    /// Mark one row as done.
    pub fn row_done(&mut self) {
        let last = self.timer.tick();

        #[cfg(feature = "progress")]
        if let Some(pb) = &self.bar {
            pb.set_message(format!(
                "last: {}, avg: {}",
                fmt_dur(last),
                fmt_dur(self.timer.avg())
            ));
            pb.inc(1);
        }

        #[cfg(not(feature = "progress"))]
        let _ = last;
    }

    pub fn rows_done(&self) -> u64 {
        self.timer.count()
    }

    pub fn average_row_time(&self) -> Duration {
        self.timer.avg()
    }

    pub fn finish(mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        #[cfg(feature = "progress")]
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }

    #[cfg(all(test, feature = "progress"))]
    fn bar(&self) -> Option<ProgressBar> {
        self.bar.clone()
    }
}

impl Drop for RowProgress {
    fn drop(&mut self) {
        self.clear();
    }
}
