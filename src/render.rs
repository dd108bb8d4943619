//! # Display Renderer
//!
//! Turns document text into colored spans for an on-screen preview.
//!
//! The whole document is tokenized in one pass, so newlines end up inside
//! literal spans and line structure is preserved by the text itself. Note
//! spans carry their resolved palette color (or `"black"`); literal spans
//! carry none and inherit the surrounding style.
//!
//! Two serializations are provided: [`to_html`] for web front ends and
//! [`to_ansi`] for terminals.

use serde::Serialize;

use crate::color::Rgb;
use crate::lexer::{tokenize, SegmentKind};
use crate::palette::{resolve_color, Palette};

/// A run of text with an optional display color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledSpan {
    pub text: String,
    pub kind: SegmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Tokenize `text` and attach palette colors to the notes.
pub fn render_spans(text: &str, palette: &Palette) -> Vec<StyledSpan> {
    tokenize(text)
        .into_iter()
        .map(|segment| StyledSpan {
            text: segment.text.to_string(),
            kind: segment.kind,
            color: match segment.kind {
                SegmentKind::Note => Some(resolve_color(segment.text, palette).to_string()),
                SegmentKind::Literal => None,
            },
        })
        .collect()
}

/// Render spans as an HTML fragment.
///
/// Notes are bold colored spans; literal text is escaped in place.
pub fn to_html(spans: &[StyledSpan]) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="text-preview" style="white-space: pre-wrap">"#);
    for span in spans {
        match &span.color {
            Some(color) => {
                html.push_str(&format!(
                    r#"<span style="color: {}; font-weight: bold">{}</span>"#,
                    escape_html(color),
                    escape_html(&span.text)
                ));
            }
            None => html.push_str(&escape_html(&span.text)),
        }
    }
    html.push_str("</div>");
    html
}

/// Render spans with 24-bit ANSI foreground colors.
///
/// Colors that do not parse are printed without styling.
pub fn to_ansi(spans: &[StyledSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        match span.color.as_deref().and_then(Rgb::parse) {
            Some(rgb) => {
                out.push_str(&format!(
                    "\x1b[1;38;2;{};{};{}m{}\x1b[0m",
                    rgb.r, rgb.g, rgb.b, span.text
                ));
            }
            None => out.push_str(&span.text),
        }
    }
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
