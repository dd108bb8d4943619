//! RGB colors and the "unassigned" fallbacks.
//!
//! The display renderer works with the palette's color strings directly and
//! uses [`DISPLAY_FALLBACK`]; the export sink needs numeric channels and uses
//! [`EXPORT_FALLBACK`]. Both mean "no color assigned" and must stay in sync:
//! `Rgb::parse(DISPLAY_FALLBACK) == Some(EXPORT_FALLBACK)`.

use serde::Serialize;

/// Display color for notes missing from the palette.
pub const DISPLAY_FALLBACK: &str = "black";

/// Export color for notes missing from the palette.
pub const EXPORT_FALLBACK: Rgb = Rgb::BLACK;

/// An 8-bit-per-channel color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `#RGB` or the keyword `black`.
    ///
    /// ```
    /// # use kalimba::Rgb;
    /// assert_eq!(Rgb::parse("#FF5252"), Some(Rgb::new(255, 82, 82)));
    /// assert_eq!(Rgb::parse("#0f0"), Some(Rgb::new(0, 255, 0)));
    /// assert_eq!(Rgb::parse("black"), Some(Rgb::BLACK));
    /// assert_eq!(Rgb::parse("FF5252"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Rgb> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(DISPLAY_FALLBACK) {
            return Some(Rgb::BLACK);
        }

        let hex = s.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            6 => Some(Rgb {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Rgb {
                    r: channel(0)?,
                    g: channel(1)?,
                    b: channel(2)?,
                })
            }
            _ => None,
        }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels scaled to 0.0..=1.0, as PDF color operators expect.
    pub fn to_unit(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}
