//! Calendar index: month day-grid computation and selection state.
//!
//! # Responsibility
//! - Compute Monday-first month grids independent of storage.
//! - Track the displayed month and selected day for one session.
//! - Publish day selections on a channel decoupled from rendering.
//!
//! # Invariants
//! - Day cells carry zero-padded `YYYY-MM-DD` dates.
//! - Month navigation rolls over year boundaries.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod month_grid;
pub mod navigator;

pub use month_grid::{
    render, render_month, CalendarCell, CalendarDay, CalendarMonth, CalendarView, MONTH_NAMES,
};
pub use navigator::{CalendarNavigator, DateSelected};

pub type CalendarResult<T> = Result<T, CalendarError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Month outside `1..=12`.
    InvalidMonth(u32),
    /// Year outside the representable calendar range.
    YearOutOfRange(i32),
    /// Date text is not a valid `YYYY-MM-DD` value.
    InvalidDate(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => write!(f, "month must be within 1..=12, got {month}"),
            Self::YearOutOfRange(year) => write!(f, "year {year} is outside the supported range"),
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for CalendarError {}
