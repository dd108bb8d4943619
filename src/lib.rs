pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod lexer;
pub mod logging;
pub mod palette;
pub mod render;
pub mod session;
pub mod store;
pub mod visual;

pub use color::{Rgb, DISPLAY_FALLBACK, EXPORT_FALLBACK};
pub use error::*;
pub use export::{export_document, ExportOptions, ExportSummary, PageLayout, PdfSink, TextSink};
pub use lexer::{tokenize, Segment, SegmentKind};
pub use palette::{resolve_color, resolve_rgb, Palette};
pub use render::{render_spans, StyledSpan};
pub use session::Session;

/// Render a document as an HTML preview fragment.
pub fn preview_html(text: &str, palette: &Palette) -> String {
    render::to_html(&render_spans(text, palette))
}

/// Render a document for a 24-bit color terminal.
pub fn preview_ansi(text: &str, palette: &Palette) -> String {
    render::to_ansi(&render_spans(text, palette))
}

/// Export a document to a PDF file at `options.filename`.
pub fn export_pdf(
    text: &str,
    palette: &Palette,
    options: &ExportOptions,
) -> Result<ExportSummary, KalimbaError> {
    let mut sink = PdfSink::new();
    export_document(text, palette, &mut sink, options)
}

/// Render the tine visualization for a palette as SVG.
pub fn tines_svg(palette: &Palette) -> Result<String, KalimbaError> {
    let dims = visual::TineDimensions::default();
    visual::tines_to_svg(&visual::tine_layout(palette, &dims), &dims)
}
