//! The paginated text sink seam
//!
//! [`TextSink`] is the only thing the exporter talks to. [`RecordingSink`]
//! keeps every call as a [`DrawCommand`] and measures text with a fixed
//! advance per character, which makes pagination and cursor math easy to
//! check and to dump as JSON.

use crate::color::Rgb;
use crate::error::KalimbaError;

use super::types::DrawCommand;

/// A paginated rich-text output target
pub trait TextSink {
    fn set_font_size(&mut self, size: f64);
    fn set_text_color(&mut self, color: Rgb);
    /// Width of `text` at the current font size, in layout units.
    fn text_width(&self, text: &str) -> f64;
    fn draw_text(&mut self, text: &str, x: f64, y: f64);
    fn add_page(&mut self);
    /// Finalize the output. Called exactly once per export.
    fn save(&mut self, filename: &str) -> Result<(), KalimbaError>;
}

/// Sink that records calls instead of producing a document
#[derive(Debug, Clone)]
pub struct RecordingSink {
    pub commands: Vec<DrawCommand>,
    char_width: f64,
    fail_save: Option<String>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl RecordingSink {
    /// Measure every character as `char_width` units wide.
    pub fn new(char_width: f64) -> Self {
        Self {
            commands: Vec::new(),
            char_width,
            fail_save: None,
        }
    }

    /// Make `save` fail with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_save: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn page_breaks(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::AddPage))
            .count()
    }

    pub fn draws(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::DrawText { text, x, y } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }
}

impl TextSink for RecordingSink {
    fn set_font_size(&mut self, size: f64) {
        self.commands.push(DrawCommand::SetFontSize { size });
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::SetTextColor { color });
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn add_page(&mut self) {
        self.commands.push(DrawCommand::AddPage);
    }

    fn save(&mut self, filename: &str) -> Result<(), KalimbaError> {
        if let Some(message) = &self.fail_save {
            return Err(KalimbaError::Export {
                filename: filename.to_string(),
                message: message.clone(),
            });
        }
        self.commands.push(DrawCommand::Save {
            filename: filename.to_string(),
        });
        Ok(())
    }
}
