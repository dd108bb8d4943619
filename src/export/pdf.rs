//! Minimal PDF writer
//!
//! Produces A4 pages with the standard Helvetica font. Layout coordinates are
//! millimetres measured from the top-left corner of the page; they are
//! converted to PDF points (origin bottom-left) when text is placed.
//!
//! Text is written as single-byte WinAnsi strings: ASCII and Latin-1
//! characters are kept, anything else becomes `?`.

use std::fmt::Write as _;
use std::fs;

use log::debug;

use crate::color::Rgb;
use crate::error::KalimbaError;

use super::sink::TextSink;

/// Points per millimetre
const PT_PER_MM: f64 = 72.0 / 25.4;
const A4_WIDTH_MM: f64 = 210.0;
const A4_HEIGHT_MM: f64 = 297.0;
/// Advance used for characters outside the metrics table
const DEFAULT_GLYPH_WIDTH: u16 = 556;

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// A [`TextSink`] that builds a PDF document in memory
#[derive(Debug, Clone)]
pub struct PdfSink {
    pages: Vec<String>,
    font_size: f64,
    color: Rgb,
}

impl Default for PdfSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSink {
    pub fn new() -> Self {
        Self {
            pages: vec![String::new()],
            font_size: 16.0,
            color: Rgb::BLACK,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize the document.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut objects: Vec<String> = Vec::new();

        let page_ids: Vec<usize> = (0..self.pages.len()).map(|i| 4 + i * 2).collect();
        let kids = page_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");

        objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
        objects.push(format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            self.pages.len()
        ));
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        for (i, content) in self.pages.iter().enumerate() {
            let content_id = page_ids[i] + 1;
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                A4_WIDTH_MM * PT_PER_MM,
                A4_HEIGHT_MM * PT_PER_MM,
                content_id
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}endstream",
                content.len(),
                content
            ));
        }

        let mut pdf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            let _ = write!(pdf, "{} 0 obj\n{}\nendobj\n", i + 1, body);
        }

        let xref_offset = pdf.len();
        let _ = write!(pdf, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            let _ = write!(pdf, "{:010} 00000 n \n", offset);
        }
        let _ = write!(
            pdf,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        );

        pdf.into_bytes()
    }

    fn current_page(&mut self) -> &mut String {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl TextSink for PdfSink {
    fn set_font_size(&mut self, size: f64) {
        self.font_size = size;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn text_width(&self, text: &str) -> f64 {
        let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
        units as f64 / 1000.0 * self.font_size / PT_PER_MM
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) {
        if text.is_empty() {
            return;
        }
        let (r, g, b) = self.color.to_unit();
        let size = self.font_size;
        let line = format!(
            "BT /F1 {:.2} Tf {:.3} {:.3} {:.3} rg {:.2} {:.2} Td ({}) Tj ET\n",
            size,
            r,
            g,
            b,
            x * PT_PER_MM,
            (A4_HEIGHT_MM - y) * PT_PER_MM,
            encode_text(text)
        );
        self.current_page().push_str(&line);
    }

    fn add_page(&mut self) {
        self.pages.push(String::new());
    }

    fn save(&mut self, filename: &str) -> Result<(), KalimbaError> {
        let bytes = self.to_bytes();
        fs::write(filename, &bytes).map_err(|e| KalimbaError::Export {
            filename: filename.to_string(),
            message: e.to_string(),
        })?;
        debug!(
            "event=pdf_save module=export status=ok file={} bytes={} pages={}",
            filename,
            bytes.len(),
            self.pages.len()
        );
        Ok(())
    }
}

fn glyph_width(c: char) -> u16 {
    match c as u32 {
        code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize],
        _ => DEFAULT_GLYPH_WIDTH,
    }
}

/// Escape a string for a PDF literal string in WinAnsi encoding.
fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\t' => out.push(' '),
            ' '..='~' => out.push(c),
            '\u{A0}'..='\u{FF}' => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_scales_with_font_size() {
        let mut sink = PdfSink::new();
        sink.set_font_size(12.0);
        let small = sink.text_width("1 2 3");
        sink.set_font_size(24.0);
        let large = sink.text_width("1 2 3");
        assert!(small > 0.0);
        assert!((large - small * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_digit_width() {
        let mut sink = PdfSink::new();
        sink.set_font_size(12.0);
        // 556/1000 em at 12pt, in millimetres
        let expected = 0.556 * 12.0 / PT_PER_MM;
        assert!((sink.text_width("1") - expected).abs() < 1e-9);
        assert!(sink.text_width("1'") > sink.text_width("1"));
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_text("a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(encode_text("é"), "\\351");
        assert_eq!(encode_text("♪1"), "?1");
    }

    #[test]
    fn test_document_structure() {
        let mut sink = PdfSink::new();
        sink.set_font_size(12.0);
        sink.set_text_color(Rgb::new(255, 0, 0));
        sink.draw_text("1'", 20.0, 30.0);
        sink.add_page();
        sink.draw_text("2", 20.0, 20.0);

        let pdf = String::from_utf8(sink.to_bytes()).unwrap();
        assert!(pdf.starts_with("%PDF-1.4\n"));
        assert!(pdf.ends_with("%%EOF\n"));
        assert!(pdf.contains("/Count 2"));
        assert!(pdf.contains("/BaseFont /Helvetica"));
        assert!(pdf.contains("1.000 0.000 0.000 rg"));
        assert!(pdf.contains("(1') Tj"));
        assert_eq!(sink.page_count(), 2);
    }

    #[test]
    fn test_fresh_sink_draws_on_first_page() {
        let mut sink = PdfSink::new();
        assert_eq!(sink.page_count(), 1);
        sink.draw_text("3", 20.0, 30.0);

        let pdf = String::from_utf8(sink.to_bytes()).unwrap();
        assert!(pdf.contains("/Count 1"));
        assert!(pdf.contains("(3) Tj"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut sink = PdfSink::new();
        sink.draw_text("hello", 20.0, 20.0);
        let bytes = sink.to_bytes();
        let pdf = String::from_utf8(bytes).unwrap();

        let xref_start = pdf.find("xref\n").unwrap();
        let entries: Vec<usize> = pdf[xref_start..]
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert_eq!(entries.len(), 5);
        for (i, offset) in entries.iter().enumerate() {
            assert!(pdf[*offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let mut sink = PdfSink::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");
        let result = sink.save(path.to_str().unwrap());
        assert!(matches!(result, Err(KalimbaError::Export { .. })));
    }
}
