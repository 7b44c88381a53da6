//! Report generator: paginated text layout of the task log.
//!
//! # Responsibility
//! - Turn the task sequence into positioned text lines and page breaks.
//! - Name the exported file after the export moment.
//!
//! # Invariants
//! - Output depends only on the tasks, the options and `exported_at`.
//! - Page breaks are only emitted between tasks, never inside one.

mod layout;

pub use layout::{
    layout_report, ReportBlock, ReportLayout, ReportOptions, TextLine, TASK_ADVANCE,
};
