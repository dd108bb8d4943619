//! Key-value persistence
//!
//! The session saves two opaque strings: the raw document under
//! [`NOTES_KEY`] and the palette JSON under [`COLORS_KEY`]. Any backend that
//! can get and set strings by key works.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::debug;

use crate::error::KalimbaError;

pub const NOTES_KEY: &str = "kalimbaNotes";
pub const COLORS_KEY: &str = "kalimbaColors";

/// String storage keyed by name
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KalimbaError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), KalimbaError>;
}

/// In-process store; contents are lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, KalimbaError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KalimbaError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a directory
///
/// The directory is created on first write. A missing file reads as absent.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, KalimbaError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(KalimbaError::Storage {
                key: key.to_string(),
                message: "keys may only contain ASCII letters, digits, '-' and '_'".to_string(),
            });
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, KalimbaError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(KalimbaError::Undecodable {
                key: key.to_string(),
                message: e.to_string(),
            }),
            Err(e) => Err(KalimbaError::Storage {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KalimbaError> {
        let path = self.path_for(key)?;
        let storage_err = |e: std::io::Error| KalimbaError::Storage {
            key: key.to_string(),
            message: e.to_string(),
        };
        fs::create_dir_all(&self.dir).map_err(storage_err)?;
        fs::write(&path, value).map_err(storage_err)?;
        debug!(
            "event=store_set module=store key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }
}
