//! # Session Controller
//!
//! Owns the mutable editor state (document text and palette) and the store
//! that persists it. The core modules stay pure: they receive text and
//! palette as arguments, and only this controller mutates or saves them.
//!
//! ## Lifecycle
//! 1. [`Session::restore`] reads both keys from the store. Absent keys keep
//!    the defaults; a palette that fails to decode is logged and ignored.
//! 2. Each mutation ([`set_notes`](Session::set_notes),
//!    [`set_color`](Session::set_color),
//!    [`reset_palette`](Session::reset_palette)) updates memory, then writes
//!    the affected key.
//! 3. Reads ([`preview`](Session::preview), [`export`](Session::export),
//!    [`tines`](Session::tines)) work on the current snapshot and never
//!    touch the store.
//!
//! ## Example
//! ```rust
//! use kalimba::session::Session;
//! use kalimba::store::MemoryStore;
//!
//! let mut session = Session::new(MemoryStore::new());
//! session.set_notes("1 2 3'")?;
//! session.set_color("3'", "#00FF00")?;
//!
//! let spans = session.preview();
//! assert_eq!(spans[4].color.as_deref(), Some("#00FF00"));
//! # Ok::<(), kalimba::KalimbaError>(())
//! ```

use log::{info, warn};

use crate::error::KalimbaError;
use crate::export::{export_document, ExportOptions, ExportSummary, TextSink};
use crate::lexer::note_ids;
use crate::palette::Palette;
use crate::render::{render_spans, StyledSpan};
use crate::store::{KeyValueStore, COLORS_KEY, NOTES_KEY};
use crate::visual::{tine_layout, Tine, TineDimensions};

/// Editor state bound to a store
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    store: S,
    notes: String,
    palette: Palette,
}

impl<S: KeyValueStore> Session<S> {
    /// Empty document, default palette. Nothing is read from `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            notes: String::new(),
            palette: Palette::default(),
        }
    }

    /// Load the document and palette saved in `store`.
    ///
    /// # Errors
    /// Only store read failures are errors. Malformed palette data and
    /// stored values that are not valid UTF-8 are logged and ignored.
    pub fn restore(store: S) -> Result<Self, KalimbaError> {
        let mut session = Self::new(store);

        if let Some(notes) = read_text(&session.store, NOTES_KEY)? {
            session.notes = notes;
        }

        if let Some(json) = read_text(&session.store, COLORS_KEY)? {
            match Palette::from_json(&json) {
                Ok(palette) => session.palette = palette,
                Err(e) => warn!(
                    "event=session_restore module=session status=palette_ignored error={}",
                    e
                ),
            }
        }

        info!(
            "event=session_restore module=session status=ok notes_bytes={} palette_entries={}",
            session.notes.len(),
            session.palette.len()
        );
        Ok(session)
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Replace the document text and save it.
    pub fn set_notes(&mut self, text: &str) -> Result<(), KalimbaError> {
        self.notes = text.to_string();
        self.store.set(NOTES_KEY, &self.notes)
    }

    /// Assign `color` to `note` and save the palette.
    ///
    /// Invalid notes or colors leave the palette and store untouched.
    pub fn set_color(&mut self, note: &str, color: &str) -> Result<(), KalimbaError> {
        self.palette.set(note, color)?;
        info!(
            "event=palette_set module=session note={} color={}",
            note,
            self.palette.get(note).unwrap_or_default()
        );
        self.save_palette()
    }

    /// Restore the built-in palette and save it.
    pub fn reset_palette(&mut self) -> Result<(), KalimbaError> {
        self.palette.reset();
        info!("event=palette_reset module=session entries={}", self.palette.len());
        self.save_palette()
    }

    /// Colored spans for the current document.
    pub fn preview(&self) -> Vec<StyledSpan> {
        render_spans(&self.notes, &self.palette)
    }

    /// Export the current document to `sink`.
    pub fn export<T: TextSink + ?Sized>(
        &self,
        sink: &mut T,
        options: &ExportOptions,
    ) -> Result<ExportSummary, KalimbaError> {
        export_document(&self.notes, &self.palette, sink, options)
    }

    /// Tine layout colored by the current palette.
    pub fn tines(&self, dims: &TineDimensions) -> Vec<Tine> {
        tine_layout(&self.palette, dims)
    }

    /// Notes used in the document that have no palette entry.
    pub fn unassigned_notes(&self) -> Vec<&str> {
        note_ids(&self.notes)
            .into_iter()
            .filter(|note| self.palette.get(note).is_none())
            .collect()
    }

    fn save_palette(&mut self) -> Result<(), KalimbaError> {
        let json = self.palette.to_json();
        self.store.set(COLORS_KEY, &json)
    }
}

/// Read a key, treating a value that is not valid text as absent.
fn read_text<S: KeyValueStore>(store: &S, key: &str) -> Result<Option<String>, KalimbaError> {
    match store.get(key) {
        Err(e @ KalimbaError::Undecodable { .. }) => {
            warn!(
                "event=session_restore module=session status=value_ignored key={} error={}",
                key, e
            );
            Ok(None)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::RecordingSink;
    use crate::store::MemoryStore;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(MemoryStore::new());
        assert_eq!(session.notes(), "");
        assert_eq!(session.palette(), &Palette::default());
        assert!(session.preview().is_empty());
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut session = Session::new(MemoryStore::new());
        session.set_notes("1 2").unwrap();
        session.set_color("2", "#000080").unwrap();

        let store = session.into_store();
        assert_eq!(store.get(NOTES_KEY).unwrap().as_deref(), Some("1 2"));
        let saved = Palette::from_json(&store.get(COLORS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(saved.get("2"), Some("#000080"));
    }

    #[test]
    fn test_restore_roundtrip() {
        let mut session = Session::new(MemoryStore::new());
        session.set_notes("intro\n1'' 2'").unwrap();
        session.set_color("1''", "#123456").unwrap();

        let restored = Session::restore(session.into_store()).unwrap();
        assert_eq!(restored.notes(), "intro\n1'' 2'");
        assert_eq!(restored.palette().get("1''"), Some("#123456"));
    }

    #[test]
    fn test_restore_ignores_malformed_palette() {
        let mut store = MemoryStore::new();
        store.set(NOTES_KEY, "1 2 3").unwrap();
        store.set(COLORS_KEY, "{broken").unwrap();

        let session = Session::restore(store).unwrap();
        assert_eq!(session.notes(), "1 2 3");
        assert_eq!(session.palette(), &Palette::default());
    }

    struct BinaryColorsStore;

    impl KeyValueStore for BinaryColorsStore {
        fn get(&self, key: &str) -> Result<Option<String>, KalimbaError> {
            match key {
                COLORS_KEY => Err(KalimbaError::Undecodable {
                    key: key.to_string(),
                    message: "stream did not contain valid UTF-8".to_string(),
                }),
                _ => Ok(Some("1 2".to_string())),
            }
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), KalimbaError> {
            Ok(())
        }
    }

    #[test]
    fn test_restore_ignores_undecodable_palette() {
        let mut session = Session::restore(BinaryColorsStore).unwrap();
        assert_eq!(session.notes(), "1 2");
        assert_eq!(session.palette(), &Palette::default());
        // Still usable afterwards
        session.reset_palette().unwrap();
    }

    #[test]
    fn test_restore_from_empty_store() {
        let session = Session::restore(MemoryStore::new()).unwrap();
        assert_eq!(session.notes(), "");
        assert_eq!(session.palette().len(), 21);
    }

    #[test]
    fn test_invalid_color_does_not_persist() {
        let mut session = Session::new(MemoryStore::new());
        assert!(session.set_color("1", "not-a-color").is_err());
        assert!(session.set_color("1 ", "#FFFFFF").is_err());
        assert_eq!(session.store().get(COLORS_KEY).unwrap(), None);
        assert_eq!(session.palette().get("1"), Some("#FF5252"));
    }

    #[test]
    fn test_reset_after_changes() {
        let mut session = Session::new(MemoryStore::new());
        session.set_color("1", "#000000").unwrap();
        session.set_color("8", "#FFFFFF").unwrap();
        session.reset_palette().unwrap();

        assert_eq!(session.palette(), &Palette::default());
        let saved = session.store().get(COLORS_KEY).unwrap().unwrap();
        assert_eq!(Palette::from_json(&saved).unwrap(), Palette::default());
    }

    #[test]
    fn test_export_does_not_mutate_state() {
        let mut session = Session::new(MemoryStore::new());
        session.set_notes("1 2 3").unwrap();

        let mut sink = RecordingSink::failing("read-only");
        assert!(session.export(&mut sink, &ExportOptions::default()).is_err());
        assert_eq!(session.notes(), "1 2 3");
        assert_eq!(session.palette(), &Palette::default());
    }

    #[test]
    fn test_unassigned_notes() {
        let mut session = Session::new(MemoryStore::new());
        session.set_notes("1 8 9' 1 0").unwrap();
        assert_eq!(session.unassigned_notes(), vec!["8", "9'", "0"]);
    }

    #[test]
    fn test_tines_follow_session_palette() {
        let mut session = Session::new(MemoryStore::new());
        session.set_color("1", "#010203").unwrap();
        let tines = session.tines(&TineDimensions::default());
        assert_eq!(tines[8].color, "#010203");
    }
}
