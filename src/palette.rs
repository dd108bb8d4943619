//! # Color Palette
//!
//! Maps note identifiers (`1`, `2'`, `3''`, ...) to hex colors.
//!
//! The palette is deliberately sparse: it does not need an entry for every
//! note the tokenizer can produce. Lookups for missing notes resolve to black
//! through [`resolve_color`] (display) or [`resolve_rgb`] (export).
//!
//! ## Persistence format
//! A flat JSON object of note identifier to color string, e.g.
//! `{"1":"#FF5252","1'":"#4285F4"}`. Keys are kept sorted so the encoding
//! is stable.
//!
//! ## Example
//! ```rust
//! use kalimba::{resolve_color, Palette};
//!
//! let palette = Palette::from_json(r##"{"1": "#FF0000"}"##)?;
//! assert_eq!(resolve_color("1", &palette), "#FF0000");
//! assert_eq!(resolve_color("2", &palette), "black");
//! # Ok::<(), kalimba::KalimbaError>(())
//! ```

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, DISPLAY_FALLBACK, EXPORT_FALLBACK};
use crate::error::KalimbaError;
use crate::lexer::is_note_id;

/// Built-in colors: base notes 1-7, each plain, `'` and `''`.
pub const DEFAULT_COLORS: [(&str, &str); 21] = [
    ("1", "#FF5252"),
    ("1'", "#4285F4"),
    ("1''", "#FFEB3B"),
    ("2", "#FF9800"),
    ("2'", "#2196F3"),
    ("2''", "#FFC107"),
    ("3", "#4CAF50"),
    ("3'", "#673AB7"),
    ("3''", "#00BCD4"),
    ("4", "#9C27B0"),
    ("4'", "#009688"),
    ("4''", "#8BC34A"),
    ("5", "#E91E63"),
    ("5'", "#3F51B5"),
    ("5''", "#CDDC39"),
    ("6", "#795548"),
    ("6'", "#607D8B"),
    ("6''", "#FF5722"),
    ("7", "#9E9E9E"),
    ("7'", "#F44336"),
    ("7''", "#03A9F4"),
];

/// Note identifier to color string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: BTreeMap<String, String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS
                .iter()
                .map(|(note, color)| (note.to_string(), color.to_string()))
                .collect(),
        }
    }
}

impl Palette {
    /// A palette with no entries; every note resolves to the fallback.
    pub fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    pub fn get(&self, note: &str) -> Option<&str> {
        self.colors.get(note).map(String::as_str)
    }

    /// Assign a color to a note.
    ///
    /// # Errors
    /// - [`KalimbaError::InvalidNote`] if `note` is not exactly one note token.
    /// - [`KalimbaError::InvalidColor`] if `color` does not parse.
    ///
    /// The palette is unchanged when an error is returned.
    pub fn set(&mut self, note: &str, color: &str) -> Result<(), KalimbaError> {
        if !is_note_id(note) {
            return Err(KalimbaError::InvalidNote(note.to_string()));
        }
        let rgb = Rgb::parse(color).ok_or_else(|| KalimbaError::InvalidColor {
            note: note.to_string(),
            color: color.to_string(),
        })?;
        self.colors.insert(note.to_string(), rgb.to_hex());
        Ok(())
    }

    /// Restore the 21 built-in entries, discarding all changes.
    pub fn reset(&mut self) {
        *self = Palette::default();
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_json(&self) -> String {
        // A map of strings always serializes
        serde_json::to_string(&self.colors).unwrap_or_else(|_| "{}".to_string())
    }

    /// Decode a persisted palette.
    ///
    /// Accepts any flat object of strings. Entries are not validated here;
    /// unparseable colors resolve to the fallback at lookup time.
    pub fn from_json(json: &str) -> Result<Palette, KalimbaError> {
        let colors: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| KalimbaError::PaletteDecode(e.to_string()))?;
        Ok(Palette { colors })
    }
}

/// Display color for a note: the palette entry, or `"black"`.
pub fn resolve_color<'a>(note: &str, palette: &'a Palette) -> &'a str {
    palette.get(note).unwrap_or(DISPLAY_FALLBACK)
}

/// Export color for a note: the parsed palette entry, or black.
pub fn resolve_rgb(note: &str, palette: &Palette) -> Rgb {
    match palette.get(note) {
        Some(color) => Rgb::parse(color).unwrap_or_else(|| {
            warn!(
                "event=color_resolve module=palette status=fallback note={} color={:?}",
                note, color
            );
            EXPORT_FALLBACK
        }),
        None => EXPORT_FALLBACK,
    }
}
