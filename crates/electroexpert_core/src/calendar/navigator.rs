//! Session calendar state: displayed month, selected day and the
//! selection channel.

use super::month_grid::{render_month, CalendarMonth, CalendarView};
use super::{CalendarError, CalendarResult};
use crate::clock::SharedClock;
use crate::model::record_date::{format_record_date, parse_record_date};
use chrono::NaiveDate;
use log::debug;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Event published when the user picks a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSelected {
    /// `YYYY-MM-DD`.
    pub date: String,
}

/// Stateful cursor over the month grid.
///
/// Starts on the clock's current month with today selected.
pub struct CalendarNavigator {
    clock: SharedClock,
    displayed: CalendarMonth,
    selected: NaiveDate,
    subscribers: Vec<Sender<DateSelected>>,
}

impl CalendarNavigator {
    pub fn new(clock: SharedClock) -> Self {
        let today = clock.today();
        Self {
            clock,
            displayed: CalendarMonth::containing(today),
            selected: today,
            subscribers: Vec::new(),
        }
    }

    pub fn displayed(&self) -> CalendarMonth {
        self.displayed
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn selected_date(&self) -> String {
        format_record_date(self.selected)
    }

    /// Moves the displayed month by `delta`; selection is untouched.
    pub fn change_month(&mut self, delta: i32) -> CalendarMonth {
        self.displayed = self.displayed.shift(delta);
        self.displayed
    }

    /// Renders the displayed month against the clock's today.
    pub fn render(&self) -> CalendarResult<CalendarView> {
        render_month(self.displayed, Some(self.selected), self.clock.today())
    }

    /// Returns a receiver for future selection events.
    pub fn subscribe(&mut self) -> Receiver<DateSelected> {
        let (sender, receiver) = channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Selects `date` and notifies subscribers.
    ///
    /// # Errors
    /// - `InvalidDate` when `date` is not a valid `YYYY-MM-DD` value; the
    ///   selection is unchanged and nothing is published.
    pub fn select_day(&mut self, date: &str) -> CalendarResult<()> {
        let parsed =
            parse_record_date(date).ok_or_else(|| CalendarError::InvalidDate(date.to_string()))?;
        self.selected = parsed;

        let event = DateSelected {
            date: format_record_date(parsed),
        };
        // Receivers that were dropped are pruned here.
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        debug!(
            "event=calendar_select module=calendar status=ok date={} subscribers={}",
            event.date,
            self.subscribers.len()
        );
        Ok(())
    }
}
