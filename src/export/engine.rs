//! Paginated export engine
//!
//! Walks the document line by line and drives a [`TextSink`]:
//!
//! ```text
//! Init -> (per line: NewPage?) -> DrawSegments* -> NextLine -> ... -> ResetColor -> Finalize
//! ```
//!
//! Pagination is decided before each row from the cursor value preceding
//! that row, so a row is never split and the break happens at the first row
//! whose y would exceed `page_bottom`.

use log::{debug, info};

use crate::color::Rgb;
use crate::error::KalimbaError;
use crate::lexer::{tokenize_lines, Segment, SegmentKind};
use crate::palette::{resolve_rgb, Palette};

use super::sink::TextSink;
use super::types::{ExportOptions, ExportSummary};

/// Render `text` onto `sink` with notes colored from `palette`.
///
/// The title is drawn first, then one row per `\n`-separated line. The sink
/// color is reset to black before `save` is called exactly once.
///
/// # Errors
/// Returns the sink's error if `save` fails. Nothing else can fail.
pub fn export_document<S: TextSink + ?Sized>(
    text: &str,
    palette: &Palette,
    sink: &mut S,
    options: &ExportOptions,
) -> Result<ExportSummary, KalimbaError> {
    let layout = &options.layout;

    sink.set_font_size(layout.title_font_size);
    sink.draw_text(&options.title, layout.left_margin, layout.title_y);
    sink.set_font_size(layout.body_font_size);

    let mut summary = ExportSummary {
        pages: 1,
        rows: 0,
        notes: 0,
    };
    let mut y = layout.first_row_y;

    for (row, segments) in tokenize_lines(text).iter().enumerate() {
        if y > layout.page_bottom {
            debug!(
                "event=page_break module=export row={} y={} page={}",
                row,
                y,
                summary.pages + 1
            );
            sink.add_page();
            y = layout.page_top;
            summary.pages += 1;
        }

        summary.notes += draw_row(segments, palette, sink, layout.left_margin, y);
        summary.rows += 1;
        y += layout.line_height;
    }

    sink.set_text_color(Rgb::BLACK);
    sink.save(&options.filename)?;

    info!(
        "event=export module=export status=ok file={} pages={} rows={} notes={}",
        options.filename, summary.pages, summary.rows, summary.notes
    );
    Ok(summary)
}

/// Draw one row's segments left to right; returns the number of notes drawn.
fn draw_row<S: TextSink + ?Sized>(
    segments: &[Segment<'_>],
    palette: &Palette,
    sink: &mut S,
    left_margin: f64,
    y: f64,
) -> usize {
    let mut x = left_margin;
    let mut notes = 0;

    for segment in segments {
        let color = match segment.kind {
            SegmentKind::Literal => Rgb::BLACK,
            SegmentKind::Note => {
                notes += 1;
                resolve_rgb(segment.text, palette)
            }
        };
        sink.set_text_color(color);
        sink.draw_text(segment.text, x, y);
        x += sink.text_width(segment.text);
    }

    notes
}
