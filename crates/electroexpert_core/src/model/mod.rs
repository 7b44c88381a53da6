//! Record models for maintenance tasks, reference schematics and settings.
//!
//! # Responsibility
//! - Define complete record shapes persisted by the collection stores.
//! - Define explicit partial-input drafts and the pure defaulting that turns
//!   a draft into a complete record.
//!
//! # Invariants
//! - Every persisted record carries a non-empty string `id`.
//! - Task dates are always valid zero-padded `YYYY-MM-DD` values.
//! - Saved schematics always carry a non-blank `img`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod record_date;
pub mod schematic;
pub mod settings;
pub mod task;

/// Treats missing and whitespace-only text as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Draft rejected before it could become a complete record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A schematic must reference an image before it can be saved.
    MissingImage,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingImage => write!(f, "schematic image is required"),
        }
    }
}

impl Error for RecordValidationError {}
