//! Pure month-grid computation.

use super::{CalendarError, CalendarResult};
use crate::model::record_date::{format_record_date, parse_record_date};
use chrono::{Datelike, Days, NaiveDate};

/// Month names used in the grid label.
pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// A displayed `(year, month)` pair, month in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> CalendarResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Moves by `delta` months, carrying into the year.
    ///
    /// Saturates at the first and last representable months.
    pub fn shift(self, delta: i32) -> Self {
        const FIRST: i64 = i32::MIN as i64 * 12;
        const LAST: i64 = i32::MAX as i64 * 12 + 11;
        let index = (i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(delta))
            .clamp(FIRST, LAST);
        // Clamped, so the quotient fits in i32.
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn next(self) -> Self {
        self.shift(1)
    }

    pub fn prev(self) -> Self {
        self.shift(-1)
    }

    pub fn first_day(self) -> CalendarResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .ok_or(CalendarError::YearOutOfRange(self.year))
    }

    /// Day count: the day before the first of the next month.
    pub fn days_in_month(self) -> CalendarResult<u32> {
        let next_first = self.next().first_day()?;
        next_first
            .checked_sub_days(Days::new(1))
            .map(|last| last.day())
            .ok_or(CalendarError::YearOutOfRange(self.year))
    }

    /// Blank cells before day 1 in a Monday-first week.
    pub fn leading_blanks(self) -> CalendarResult<usize> {
        Ok(self.first_day()?.weekday().num_days_from_monday() as usize)
    }

    /// Label such as `Febrero 2024`.
    pub fn label(self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

/// One day cell in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub is_today: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day(CalendarDay),
}

/// View model for one rendered month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub month: CalendarMonth,
    pub label: String,
    pub leading_blanks: usize,
    pub cells: Vec<CalendarCell>,
}

impl CalendarView {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.cells.iter().filter_map(|cell| match cell {
            CalendarCell::Day(day) => Some(day),
            CalendarCell::Blank => None,
        })
    }

    pub fn day_count(&self) -> usize {
        self.days().count()
    }

    pub fn selected_day(&self) -> Option<&CalendarDay> {
        self.days().find(|day| day.is_selected)
    }
}

/// Builds the grid for `month`.
///
/// `today` marks the current day; `selected` marks the chosen day. Either
/// may fall outside the month, in which case no cell is flagged.
pub fn render_month(
    month: CalendarMonth,
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> CalendarResult<CalendarView> {
    let first = month.first_day()?;
    let leading_blanks = month.leading_blanks()?;
    let day_count = month.days_in_month()?;

    let mut cells = Vec::with_capacity(leading_blanks + day_count as usize);
    cells.extend(std::iter::repeat(CalendarCell::Blank).take(leading_blanks));

    for date in first.iter_days().take(day_count as usize) {
        cells.push(CalendarCell::Day(CalendarDay {
            day: date.day(),
            date: format_record_date(date),
            is_today: date == today,
            is_selected: selected == Some(date),
        }));
    }

    Ok(CalendarView {
        month,
        label: month.label(),
        leading_blanks,
        cells,
    })
}

/// Builds the grid for `(year, month)` with a string-typed selection.
///
/// A selection that is not a valid `YYYY-MM-DD` date selects nothing.
pub fn render(
    year: i32,
    month: u32,
    selected_date: Option<&str>,
    today: NaiveDate,
) -> CalendarResult<CalendarView> {
    let month = CalendarMonth::new(year, month)?;
    render_month(month, selected_date.and_then(parse_record_date), today)
}
