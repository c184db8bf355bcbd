//! In-memory backend.
//!
//! Holds the same serialized bytes the file backend would write. Tests use
//! it to seed raw (even corrupt) collections, to read back exported
//! receipts, and to inject write failures per collection.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Backend;
use crate::error::{DbError, DbResult};

#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: Mutex<HashMap<String, Vec<u8>>>,
    exports: Mutex<HashMap<String, String>>,
    /// Name → writes still allowed before every write fails.
    failing_writes: Mutex<HashMap<String, usize>>,
}

fn guard<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw bytes for `name`, bypassing serialization.
    pub fn put_raw(&self, name: &str, bytes: impl Into<Vec<u8>>) {
        guard(&self.collections).insert(name.to_string(), bytes.into());
    }

    /// Raw bytes currently stored for `name`.
    pub fn raw(&self, name: &str) -> Option<Vec<u8>> {
        guard(&self.collections).get(name).cloned()
    }

    /// Text exported under `file_name`, if any.
    pub fn exported(&self, file_name: &str) -> Option<String> {
        guard(&self.exports).get(file_name).cloned()
    }

    /// Names of every exported document, sorted.
    pub fn export_names(&self) -> Vec<String> {
        let mut names: Vec<String> = guard(&self.exports).keys().cloned().collect();
        names.sort();
        names
    }

    /// Makes every following write to `name` (a collection name, or
    /// [`EXPORTS`](Self::EXPORTS) for text exports) fail until cleared.
    pub fn fail_writes(&self, name: &str, fail: bool) {
        let mut failing = guard(&self.failing_writes);
        if fail {
            failing.insert(name.to_string(), 0);
        } else {
            failing.remove(name);
        }
    }

    /// Lets `allowed` more writes to `name` succeed, then fails every
    /// following one until cleared with [`fail_writes`](Self::fail_writes).
    pub fn fail_writes_after(&self, name: &str, allowed: usize) {
        guard(&self.failing_writes).insert(name.to_string(), allowed);
    }

    /// Pseudo-name used with [`fail_writes`](Self::fail_writes) for exports.
    pub const EXPORTS: &'static str = "<exports>";

    fn check_fault(&self, name: &str) -> DbResult<()> {
        match guard(&self.failing_writes).get_mut(name) {
            Some(0) => Err(DbError::Backend(format!("injected write failure for {name}"))),
            Some(allowed) => {
                *allowed -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Backend for MemoryBackend {
    fn read(&self, name: &str) -> DbResult<Option<Vec<u8>>> {
        Ok(self.raw(name))
    }

    fn write(&self, name: &str, bytes: &[u8]) -> DbResult<()> {
        self.check_fault(name)?;
        self.put_raw(name, bytes);
        Ok(())
    }

    fn export_text(&self, file_name: &str, contents: &str) -> DbResult<String> {
        self.check_fault(Self::EXPORTS)?;
        guard(&self.exports).insert(file_name.to_string(), contents.to_string());
        Ok(format!("memory://{file_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_faults() {
        let backend = MemoryBackend::new();
        assert!(backend.read("items").unwrap().is_none());

        backend.write("items", b"[]").unwrap();
        assert_eq!(backend.read("items").unwrap().unwrap(), b"[]");

        backend.fail_writes("items", true);
        assert!(backend.write("items", b"[1]").is_err());
        assert_eq!(backend.raw("items").unwrap(), b"[]");

        backend.fail_writes("items", false);
        backend.write("items", b"[1]").unwrap();
        assert_eq!(backend.raw("items").unwrap(), b"[1]");
    }

    #[test]
    fn test_delayed_fault() {
        let backend = MemoryBackend::new();
        backend.fail_writes_after("bills", 1);
        backend.write("bills", b"[1]").unwrap();
        assert!(backend.write("bills", b"[]").is_err());
        assert!(backend.write("bills", b"[]").is_err());
        assert_eq!(backend.raw("bills").unwrap(), b"[1]");
        assert!(backend.write("items", b"[]").is_ok());
    }

    #[test]
    fn test_exports_are_kept_by_name() {
        let backend = MemoryBackend::new();
        let location = backend.export_text("B1_2024-03-01.txt", "receipt").unwrap();
        assert_eq!(location, "memory://B1_2024-03-01.txt");
        assert_eq!(backend.exported("B1_2024-03-01.txt").unwrap(), "receipt");
        assert_eq!(backend.export_names(), vec!["B1_2024-03-01.txt".to_string()]);

        backend.fail_writes(MemoryBackend::EXPORTS, true);
        assert!(backend.export_text("B2.txt", "x").is_err());
    }
}
