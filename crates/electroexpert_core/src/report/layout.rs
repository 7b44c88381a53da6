use crate::model::task::Task;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const REPORT_TITLE: &str = "ElectroExpert Pro - Reporte Técnico";
const FILE_NAME_PREFIX: &str = "Reporte_Mantenimiento_";
const EXPORT_DATE_FORMAT: &str = "%d/%m/%Y";

const MARGIN_X: u32 = 20;
const BODY_X: u32 = 25;
const TITLE_Y: u32 = 20;
const EXPORT_DATE_Y: u32 = 30;
const TITLE_FONT: u32 = 22;
const EXPORT_DATE_FONT: u32 = 12;
const HEADER_FONT: u32 = 14;
const BODY_FONT: u32 = 10;
const HEADER_ADVANCE: u32 = 7;
const BODY_ADVANCE: u32 = 5;
const TASK_GAP: u32 = 15;

/// Cursor advance consumed by one task entry.
pub const TASK_ADVANCE: u32 = HEADER_ADVANCE + 2 * BODY_ADVANCE + TASK_GAP;

/// Page geometry for the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// A task starting below this cursor goes to a new page.
    pub page_height: u32,
    /// Cursor where the first task is laid out on page one.
    pub first_page_start: u32,
    /// Cursor after a page break.
    pub page_top: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            page_height: 270,
            first_page_start: 50,
            page_top: 20,
        }
    }
}

/// A positioned line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub x: u32,
    pub y: u32,
    pub font_size: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBlock {
    PageBreak,
    Text(TextLine),
}

/// Layout handed to the PDF collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    /// `Reporte_Mantenimiento_<epoch millis>.pdf`.
    pub file_name: String,
    pub blocks: Vec<ReportBlock>,
}

impl ReportLayout {
    /// Number of pages the layout spans.
    pub fn page_count(&self) -> usize {
        1 + self
            .blocks
            .iter()
            .filter(|block| matches!(block, ReportBlock::PageBreak))
            .count()
    }

    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.blocks.iter().filter_map(|block| match block {
            ReportBlock::Text(line) => Some(line),
            ReportBlock::PageBreak => None,
        })
    }

    /// Flattens the layout to plain text, one form feed per page break.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                ReportBlock::Text(line) => {
                    out.push_str(&line.text);
                    out.push('\n');
                }
                ReportBlock::PageBreak => out.push('\u{c}'),
            }
        }
        out
    }
}

/// Lays out `tasks` (in store order) into report blocks.
///
/// `exported_at` feeds the export-date line; `exported_at_millis` feeds the
/// file name suffix.
pub fn layout_report(
    tasks: &[Task],
    options: &ReportOptions,
    exported_at: NaiveDateTime,
    exported_at_millis: i64,
) -> ReportLayout {
    let mut blocks = Vec::with_capacity(2 + tasks.len() * 4);
    blocks.push(text(MARGIN_X, TITLE_Y, TITLE_FONT, REPORT_TITLE.to_string()));
    blocks.push(text(
        MARGIN_X,
        EXPORT_DATE_Y,
        EXPORT_DATE_FONT,
        format!(
            "Fecha de exportación: {}",
            exported_at.format(EXPORT_DATE_FORMAT)
        ),
    ));

    let mut y = options.first_page_start;
    for (index, task) in tasks.iter().enumerate() {
        if y > options.page_height {
            blocks.push(ReportBlock::PageBreak);
            y = options.page_top;
        }

        blocks.push(text(
            MARGIN_X,
            y,
            HEADER_FONT,
            format!("{}. {} [{}]", index + 1, task.title, task.date_string()),
        ));
        y = y.saturating_add(HEADER_ADVANCE);
        blocks.push(text(
            BODY_X,
            y,
            BODY_FONT,
            format!("Categoría: {} | Severidad: {}", task.category, task.severity),
        ));
        y = y.saturating_add(BODY_ADVANCE);
        blocks.push(text(
            BODY_X,
            y,
            BODY_FONT,
            format!("Diagnosis: {}", task.description),
        ));
        y = y.saturating_add(BODY_ADVANCE);
        blocks.push(text(
            BODY_X,
            y,
            BODY_FONT,
            format!("Solución: {}", task.solution),
        ));
        y = y.saturating_add(TASK_GAP);
    }

    ReportLayout {
        file_name: format!("{FILE_NAME_PREFIX}{exported_at_millis}.pdf"),
        blocks,
    }
}

fn text(x: u32, y: u32, font_size: u32, text: String) -> ReportBlock {
    ReportBlock::Text(TextLine {
        x,
        y,
        font_size,
        text,
    })
}
