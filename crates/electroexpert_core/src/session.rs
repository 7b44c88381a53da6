//! Per-session aggregate wiring stores, calendar and agenda together.
//!
//! # Responsibility
//! - Own exactly one store per collection for the current user session.
//! - Keep the daily agenda in step with calendar selection.
//! - Produce report layouts from the current task order.
//!
//! # Invariants
//! - `view_date` is always a valid `YYYY-MM-DD` day.
//! - Tasks saved without a date land on the current `view_date`.

use crate::calendar::{CalendarNavigator, CalendarResult, CalendarView, DateSelected};
use crate::clock::SharedClock;
use crate::config::{ConfigError, CoreConfig};
use crate::model::non_blank;
use crate::model::record_date::format_record_date;
use crate::model::schematic::{Schematic, SchematicDraft};
use crate::model::settings::Settings;
use crate::model::task::{Task, TaskDraft};
use crate::report::{layout_report, ReportLayout, ReportOptions};
use crate::repo::collection_repo::{CollectionRepository, RepoError, RepoResult};
use crate::service::schematic_service::SchematicStore;
use crate::service::settings_service::SettingsService;
use crate::service::task_service::TaskStore;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::Receiver;

/// Error for opening a session from configuration.
#[derive(Debug)]
pub enum SessionError {
    Config(ConfigError),
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Tasks scheduled on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAgenda {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub tasks: Vec<Task>,
}

impl DailyAgenda {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// One user session over a collection repository.
pub struct Session<R: CollectionRepository + Clone> {
    clock: SharedClock,
    tasks: TaskStore<R>,
    schematics: SchematicStore<R>,
    settings: SettingsService<R>,
    calendar: CalendarNavigator,
    view_date: NaiveDate,
    report: ReportOptions,
}

impl<R: CollectionRepository + Clone> Session<R> {
    /// Opens every store (seeding empty ones) and starts on today, with the
    /// default report geometry.
    pub fn open(repo: R, clock: SharedClock) -> RepoResult<Self> {
        let tasks = TaskStore::open(repo.clone(), clock.clone())?;
        let schematics = SchematicStore::open(repo.clone())?;
        let settings = SettingsService::open(repo)?;
        let calendar = CalendarNavigator::new(clock.clone());
        let view_date = clock.today();

        Ok(Self {
            clock,
            tasks,
            schematics,
            settings,
            calendar,
            view_date,
            report: ReportOptions::default(),
        })
    }

    /// Validates `config`, starts logging and opens the session with the
    /// configured report geometry.
    ///
    /// `repo` borrows the connection from [`CoreConfig::open_database`], so
    /// the caller opens the database first.
    ///
    /// # Errors
    /// - `SessionError::Config` for invalid options or a logging conflict.
    /// - `SessionError::Repo` when loading or seeding a store fails.
    pub fn open_with_config(
        repo: R,
        config: &CoreConfig,
        clock: SharedClock,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        config.init_logging()?;
        let mut session = Self::open(repo, clock)?;
        session.report = config.report;
        Ok(session)
    }

    pub fn tasks(&self) -> &TaskStore<R> {
        &self.tasks
    }

    pub fn schematics(&self) -> &SchematicStore<R> {
        &self.schematics
    }

    pub fn calendar(&self) -> &CalendarNavigator {
        &self.calendar
    }

    pub fn settings(&self) -> Settings {
        self.settings.current()
    }

    pub fn report_options(&self) -> ReportOptions {
        self.report
    }

    pub fn view_date(&self) -> String {
        format_record_date(self.view_date)
    }

    /// Tasks for the current view date.
    pub fn daily_agenda(&self) -> DailyAgenda {
        let date = self.view_date();
        DailyAgenda {
            tasks: self.tasks.list_by_date(&date),
            date,
        }
    }

    pub fn render_calendar(&self) -> CalendarResult<CalendarView> {
        self.calendar.render()
    }

    pub fn change_month(&mut self, delta: i32) -> CalendarResult<CalendarView> {
        self.calendar.change_month(delta);
        self.calendar.render()
    }

    pub fn subscribe_selection(&mut self) -> Receiver<DateSelected> {
        self.calendar.subscribe()
    }

    /// Selects a calendar day and moves the agenda to it.
    pub fn select_day(&mut self, date: &str) -> CalendarResult<DailyAgenda> {
        self.calendar.select_day(date)?;
        self.view_date = self.calendar.selected();
        Ok(self.daily_agenda())
    }

    /// Saves a task; drafts with a missing or blank date get the current
    /// view date.
    pub fn save_task(&mut self, mut draft: TaskDraft) -> RepoResult<Task> {
        draft.date = non_blank(draft.date).or_else(|| Some(self.view_date()));
        self.tasks.upsert(draft)
    }

    pub fn delete_task(&mut self, id: &str) -> RepoResult<()> {
        self.tasks.remove(id)
    }

    pub fn search_tasks(&self, query: &str) -> Vec<Task> {
        self.tasks.search(query)
    }

    pub fn save_schematic(&mut self, draft: SchematicDraft) -> RepoResult<Schematic> {
        self.schematics.upsert(draft)
    }

    pub fn delete_schematic(&mut self, id: &str) -> RepoResult<()> {
        self.schematics.remove(id)
    }

    pub fn search_schematics(&self, filter: &str) -> Vec<Schematic> {
        self.schematics.search(filter)
    }

    pub fn toggle_dark_mode(&mut self) -> RepoResult<bool> {
        self.settings.toggle_dark_mode()
    }

    /// Lays out the whole task log as of the clock's now, using the session's
    /// report geometry.
    pub fn export_report(&self) -> ReportLayout {
        layout_report(
            self.tasks.list(),
            &self.report,
            self.clock.now(),
            self.clock.epoch_millis(),
        )
    }
}
