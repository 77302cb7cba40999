//! Terminal progress reporting.
//!
//! Render workers only bump an atomic counter; a separate reporter thread
//! redraws the bar at a fixed interval.

use std::fmt::Display;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use pathlight_renderer::ProgressSink;

const BAR_WIDTH: usize = 50;

pub struct Progress {
    current: AtomicUsize,
    max: usize,
    done: AtomicBool,
}

impl Progress {
    pub fn new(max: usize) -> Self {
        Self {
            current: AtomicUsize::new(0),
            max,
            done: AtomicBool::new(false),
        }
    }

    pub fn get_raw(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    pub fn percent(&self) -> f32 {
        if self.max == 0 {
            return 1.0;
        }
        (self.get_raw() as f32 / self.max as f32).clamp(0.0, 1.0)
    }

    /// Stop the reporter loop after its next wake-up.
    pub fn finish(&self) {
        self.done.store(true, Ordering::Release);
    }

    /// Redraw the bar every `interval` until [`Progress::finish`] is called.
    pub fn report(&self, interval: Duration) {
        while !self.done.load(Ordering::Acquire) {
            self.print();
            std::thread::sleep(interval);
        }
        self.print();
        println!();
    }

    fn print(&self) {
        print!("\r{}", self.bar());
        // A failed flush only delays the redraw
        let _ = std::io::stdout().flush();
    }

    fn bar(&self) -> PercentBar {
        PercentBar {
            percent: self.percent(),
            width: BAR_WIDTH,
        }
    }
}

impl ProgressSink for Progress {
    fn pixels_completed(&self, count: usize) {
        self.current.fetch_add(count, Ordering::Relaxed);
    }
}

pub struct PercentBar {
    pub percent: f32,
    pub width: usize,
}

impl Display for PercentBar {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filled = ((self.width - 1) as f32 * self.percent).round() as usize;
        write!(
            f,
            "[{empty:=>width_left$}>{empty:.<width_right$}] {percent:.1}%",
            empty = "",
            width_left = filled,
            width_right = self.width - 1 - filled,
            percent = 100. * self.percent
        )
    }
}
