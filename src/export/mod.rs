//! # Export Module
//!
//! Paginated, colorized export of a tablature document.
//!
//! ## Purpose
//! The exporter replicates the display tokenization line by line against a
//! paginated text sink. Each row starts at the left margin; literal text is
//! drawn in black, notes in their palette color, and the horizontal cursor
//! advances by the sink's measured width of each segment.
//!
//! ## Sub-modules
//! - `types` - PageLayout, ExportOptions, ExportSummary, DrawCommand
//! - `sink` - the TextSink trait and a recording implementation
//! - `engine` - the row walk and pagination
//! - `pdf` - an in-memory PDF sink
//!
//! ## Pagination
//! With the default layout the first row sits at y=30 and rows advance by 7.
//! Before drawing a row, if y > 280 a page is added and y resets to 20.
//! A 45-line document therefore breaks once, before its 37th line (y=282).
//!
//! ## Example
//! ```rust
//! use kalimba::export::{export_document, ExportOptions, RecordingSink};
//! use kalimba::Palette;
//!
//! let mut sink = RecordingSink::default();
//! let summary = export_document("1 2 3", &Palette::default(), &mut sink, &ExportOptions::default())?;
//!
//! assert_eq!(summary.pages, 1);
//! assert_eq!(summary.notes, 3);
//! # Ok::<(), kalimba::KalimbaError>(())
//! ```

mod engine;
mod pdf;
mod sink;
mod types;


pub use engine::export_document;
pub use pdf::PdfSink;
pub use sink::{RecordingSink, TextSink};
pub use types::{DrawCommand, ExportOptions, ExportSummary, PageLayout};
