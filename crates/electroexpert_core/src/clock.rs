//! Wall-clock access for record defaulting and calendar "today" markers.
//!
//! Everything that needs "now" takes a [`Clock`] so defaulting and layout
//! stay deterministic under test.

use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
use std::sync::Arc;

/// Shared clock handle passed to stores, the calendar and the session.
pub type SharedClock = Arc<dyn Clock>;

/// Source of the current local moment.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Milliseconds since the Unix epoch, used for export file names.
    fn epoch_millis(&self) -> i64;

    /// Current local calendar day.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn epoch_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Pins the clock to midnight of the given day.
    ///
    /// Returns `None` for an impossible date.
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }

    fn epoch_millis(&self) -> i64 {
        self.at.and_utc().timestamp_millis()
    }
}
