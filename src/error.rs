//! # Error Types
//!
//! All fallible operations in the crate return [`KalimbaError`].
//!
//! Tokenizing and color lookups never fail: unknown notes fall back to black.
//! Errors only come from the edges: rejecting user input in the session,
//! decoding persisted data, loading configuration, and the output sinks.
//!
//! ## Usage
//! ```rust
//! use kalimba::{KalimbaError, Palette};
//!
//! let mut palette = Palette::default();
//! match palette.set("x", "#FF0000") {
//!     Err(KalimbaError::InvalidNote(note)) => eprintln!("not a note: {}", note),
//!     Err(e) => eprintln!("Error: {}", e),
//!     Ok(()) => {}
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KalimbaError {
    /// A palette key that is not a single note token.
    ///
    /// # Example
    /// ```
    /// # use kalimba::KalimbaError;
    /// let err = KalimbaError::InvalidNote("8a".to_string());
    /// assert_eq!(err.to_string(), "Invalid note identifier: '8a'");
    /// ```
    #[error("Invalid note identifier: '{0}'")]
    InvalidNote(String),

    /// A color string that is not `#RRGGBB`, `#RGB` or `black`.
    #[error("Invalid color for note {note}: '{color}'")]
    InvalidColor { note: String, color: String },

    /// Persisted palette data that could not be decoded.
    #[error("Could not decode palette: {0}")]
    PaletteDecode(String),

    /// Invalid YAML configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Logger could not be started.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// A stored value that exists but is not valid text.
    #[error("Stored value for key '{key}' is not valid UTF-8: {message}")]
    Undecodable { key: String, message: String },

    /// Key-value store failure.
    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    /// The export sink could not finalize its output.
    #[error("Export failed for '{filename}': {message}")]
    Export { filename: String, message: String },

    /// SVG/HTML generation failure.
    #[error("Render error: {0}")]
    Render(String),
}
