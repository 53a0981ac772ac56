//! Progress reporting and interrupt hooks polled by the scan loop.
//!
//! Neither hook influences the search result beyond the interrupt signal:
//! a reporter only observes, and an interrupt handler only answers "stop?".

use std::sync::atomic::{AtomicBool, Ordering};

use qtty::{Quantity, Unit};

use crate::window::Interval;

/// Observer notified as each confinement interval is scanned.
///
/// For every confinement interval the engine calls [`initialize`] once,
/// [`update`] after each completed result interval (and once when the scan
/// reaches the interval's end), then [`finalize`].
///
/// [`initialize`]: ProgressReporter::initialize
/// [`update`]: ProgressReporter::update
/// [`finalize`]: ProgressReporter::finalize
pub trait ProgressReporter<U: Unit> {
    fn initialize(&mut self, bounds: Interval<U>, begin_message: &str, end_message: &str);

    /// `start`/`end` are the bounds of the interval being scanned and
    /// `current` the latest sample time.
    fn update(&mut self, start: Quantity<U>, end: Quantity<U>, current: Quantity<U>);

    fn finalize(&mut self);
}

/// Cooperative cancellation check, polled before every sample.
pub trait InterruptHandler {
    /// Returns true if the search should stop now.
    fn interrupted(&mut self) -> bool;

    /// Resets the interrupt status. The engine never calls this; callers
    /// clear the status before starting another search.
    fn clear(&mut self) {}
}

impl<U: Unit, R: ProgressReporter<U> + ?Sized> ProgressReporter<U> for &mut R {
    fn initialize(&mut self, bounds: Interval<U>, begin_message: &str, end_message: &str) {
        (**self).initialize(bounds, begin_message, end_message);
    }

    fn update(&mut self, start: Quantity<U>, end: Quantity<U>, current: Quantity<U>) {
        (**self).update(start, end, current);
    }

    fn finalize(&mut self) {
        (**self).finalize();
    }
}

impl<H: InterruptHandler + ?Sized> InterruptHandler for &mut H {
    fn interrupted(&mut self) -> bool {
        (**self).interrupted()
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Interrupt handler backed by a shared atomic flag.
///
/// Another thread (or a signal handler) sets the flag; the scan stops at the
/// next sample.
#[derive(Debug, Clone, Copy)]
pub struct FlagInterrupt<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlagInterrupt<'a> {
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl InterruptHandler for FlagInterrupt<'_> {
    fn interrupted(&mut self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    fn clear(&mut self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

/// Reporter that writes percent-complete lines through the `log` facade.
///
/// A line is emitted whenever progress advances by at least `granularity`
/// percent.
#[derive(Debug, Clone)]
pub struct LogReporter {
    granularity: f64,
    begin: String,
    end: String,
    last_percent: f64,
}

impl LogReporter {
    pub fn new(granularity: f64) -> Self {
        Self {
            granularity: granularity.max(0.0),
            begin: String::new(),
            end: String::new(),
            last_percent: 0.0,
        }
    }
}

impl Default for LogReporter {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl<U: Unit> ProgressReporter<U> for LogReporter {
    fn initialize(&mut self, bounds: Interval<U>, begin_message: &str, end_message: &str) {
        self.begin = begin_message.to_owned();
        self.end = end_message.to_owned();
        self.last_percent = 0.0;
        log::info!("{} over {}", self.begin, bounds);
    }

    fn update(&mut self, start: Quantity<U>, end: Quantity<U>, current: Quantity<U>) {
        let span = (end - start).value();
        let percent = if span > 0.0 {
            100.0 * ((current - start).value() / span).clamp(0.0, 1.0)
        } else {
            100.0
        };
        if percent - self.last_percent >= self.granularity {
            self.last_percent = percent;
            log::info!("{} {:5.1}% {}", self.begin, percent, self.end);
        }
    }

    fn finalize(&mut self) {
        log::info!("{} 100.0% {}", self.begin, self.end);
    }
}
