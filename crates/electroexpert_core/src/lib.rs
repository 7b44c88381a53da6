//! Core logic for ElectroExpert, a local-first maintenance log.
//! Records fault tasks and reference schematics, indexes tasks on a month
//! calendar, and lays out the task log for PDF export.

pub mod calendar;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;
pub mod session;

pub use calendar::{
    CalendarCell, CalendarDay, CalendarError, CalendarMonth, CalendarNavigator, CalendarView,
    DateSelected,
};
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::schematic::{Schematic, SchematicDraft};
pub use model::settings::Settings;
pub use model::task::{Severity, Task, TaskDraft};
pub use model::RecordValidationError;
pub use report::{layout_report, ReportBlock, ReportLayout, ReportOptions, TextLine};
pub use repo::collection_repo::{
    CollectionKey, CollectionRepository, RepoError, RepoResult, SqliteCollectionRepository,
};
pub use service::schematic_service::SchematicStore;
pub use service::settings_service::SettingsService;
pub use service::task_service::TaskStore;
pub use session::{DailyAgenda, Session, SessionError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
