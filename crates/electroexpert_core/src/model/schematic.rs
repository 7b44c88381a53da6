//! Reference schematic (wiring diagram image) model.
//!
//! # Invariants
//! - `img` is never blank on a complete record.
//! - Generated ids are time-ordered with a random tail (UUID v7).

use crate::model::{non_blank, RecordValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SchematicId = String;

/// Stored reference diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schematic {
    pub id: SchematicId,
    pub title: String,
    pub category: String,
    /// Opaque image reference (URL or data URI).
    pub img: String,
    #[serde(default)]
    pub description: String,
}

/// Partial schematic input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchematicDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub img: Option<String>,
    pub description: Option<String>,
}

impl SchematicDraft {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        img: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            category: Some(category.into()),
            img: Some(img.into()),
            ..Self::default()
        }
    }
}

impl Schematic {
    /// Builds a complete schematic from a draft.
    ///
    /// # Errors
    /// - `MissingImage` when `img` is absent or blank.
    pub fn from_draft(draft: SchematicDraft) -> Result<Self, RecordValidationError> {
        let img = non_blank(draft.img).ok_or(RecordValidationError::MissingImage)?;

        Ok(Self {
            id: non_blank(draft.id).unwrap_or_else(new_schematic_id),
            title: draft.title.unwrap_or_default(),
            category: draft.category.unwrap_or_default(),
            img,
            description: draft.description.unwrap_or_default(),
        })
    }

    pub fn to_draft(&self) -> SchematicDraft {
        SchematicDraft {
            id: Some(self.id.clone()),
            title: Some(self.title.clone()),
            category: Some(self.category.clone()),
            img: Some(self.img.clone()),
            description: Some(self.description.clone()),
        }
    }

    /// Category badge text: first `-` becomes a space, then uppercased.
    pub fn category_badge(&self) -> String {
        self.category.replacen('-', " ", 1).to_uppercase()
    }

    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

fn new_schematic_id() -> SchematicId {
    Uuid::now_v7().to_string()
}
