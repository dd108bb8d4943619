//! Export type definitions
//!
//! Page geometry, export options, and the recorded draw calls used by
//! [`RecordingSink`](super::RecordingSink).

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Page geometry in sink units (millimetres for the PDF sink)
///
/// # Fields
/// - `left_margin`: x where every row starts
/// - `title_y` / `title_font_size`: placement of the title line
/// - `body_font_size`: font size for note rows
/// - `first_row_y`: y of the first row on the first page
/// - `line_height`: y advance per row
/// - `page_bottom`: a row whose pre-draw y exceeds this starts a new page
/// - `page_top`: y of the first row on every following page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PageLayout {
    pub left_margin: f64,
    pub title_y: f64,
    pub title_font_size: f64,
    pub body_font_size: f64,
    pub first_row_y: f64,
    pub line_height: f64,
    pub page_bottom: f64,
    pub page_top: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            left_margin: 20.0,
            title_y: 20.0,
            title_font_size: 16.0,
            body_font_size: 12.0,
            first_row_y: 30.0,
            line_height: 7.0,
            page_bottom: 280.0,
            page_top: 20.0,
        }
    }
}

/// Everything an export needs besides the document and palette
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub title: String,
    pub filename: String,
    pub layout: PageLayout,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Kalimba Notes".to_string(),
            filename: "kalimba-notes.pdf".to_string(),
            layout: PageLayout::default(),
        }
    }
}

/// What an export produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub pages: usize,
    pub rows: usize,
    pub notes: usize,
}

/// A single call made against a text sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    SetFontSize { size: f64 },
    SetTextColor { color: Rgb },
    DrawText { text: String, x: f64, y: f64 },
    AddPage,
    Save { filename: String },
}
