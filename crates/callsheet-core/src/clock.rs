//! Injectable time source for note timestamps.

use std::cell::Cell;

use chrono::{Duration, Local, NaiveDateTime};

/// Source of the current wall-clock time.
pub trait Clock {
    /// Returns the current local time.
    fn now(&self) -> NaiveDateTime;
}

/// System clock reading the local wall time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to an instant that only moves when advanced, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Cell<NaiveDateTime>,
}

impl FixedClock {
    /// Create a clock that always reports `time`.
    pub fn new(time: NaiveDateTime) -> Self {
        Self {
            current: Cell::new(time),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.current.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
