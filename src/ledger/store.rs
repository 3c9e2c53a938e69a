//! Backing stores for the ledger document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::error::LedgerError;
use crate::utils::persistence::write_atomic;

/// Balances in insertion order.
pub type Entries = Vec<(String, i64)>;

/// Durable home of the ledger. Every write replaces the whole document.
pub trait LedgerStore: Send + Sync {
    /// Read the stored document. A missing document is an empty ledger.
    fn load(&self) -> Result<Entries, LedgerError>;

    /// Replace the stored document with `entries`.
    fn persist(&self, entries: &[(String, i64)]) -> Result<(), LedgerError>;
}

/// A JSON object `{ "<user id>": <balance>, ... }` on disk, pretty-printed
/// and key order preserved.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> LedgerError {
        LedgerError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Entries, LedgerError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        decode(&raw)
    }

    fn persist(&self, entries: &[(String, i64)]) -> Result<(), LedgerError> {
        let json = encode(entries)?;
        write_atomic(&self.path, &json).map_err(|e| self.io_error(e))
    }
}

fn decode(raw: &str) -> Result<Entries, LedgerError> {
    let doc: Map<String, Value> =
        serde_json::from_str(raw).map_err(|e| LedgerError::Corrupt(e.to_string()))?;
    doc.into_iter()
        .map(|(user, value)| match value.as_i64() {
            Some(balance) => Ok((user, balance)),
            None => Err(LedgerError::Corrupt(format!(
                "balance for {user} is not an integer: {value}"
            ))),
        })
        .collect()
}

fn encode(entries: &[(String, i64)]) -> Result<String, LedgerError> {
    let doc: Map<String, Value> = entries
        .iter()
        .map(|(user, balance)| (user.clone(), Value::from(*balance)))
        .collect();
    serde_json::to_string_pretty(&doc).map_err(|e| LedgerError::Corrupt(e.to_string()))
}

/// In-memory store, mainly for tests. Can be switched into a failing mode to
/// exercise write-failure handling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: impl IntoIterator<Item = (String, i64)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Entries {
        self.entries.lock().clone()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Entries, LedgerError> {
        Ok(self.entries.lock().clone())
    }

    fn persist(&self, entries: &[(String, i64)]) -> Result<(), LedgerError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::WriteRejected("memory store is read-only".into()));
        }
        *self.entries.lock() = entries.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl<S: LedgerStore + ?Sized> LedgerStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Entries, LedgerError> {
        (**self).load()
    }

    fn persist(&self, entries: &[(String, i64)]) -> Result<(), LedgerError> {
        (**self).persist(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_json_store_preserves_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));
        let entries = vec![
            ("zed".to_string(), 3),
            ("amy".to_string(), 10),
            ("mo".to_string(), 0),
        ];
        store.persist(&entries).unwrap();
        assert_eq!(store.load().unwrap(), entries);
    }

    #[test]
    fn test_json_store_reads_legacy_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{\n  \"123\": 4,\n  \"456\": 17\n}").unwrap();
        let store = JsonFileStore::new(&path);
        assert_eq!(
            store.load().unwrap(),
            vec![("123".to_string(), 4), ("456".to_string(), 17)]
        );
    }

    #[test]
    fn test_json_store_rejects_non_integer_balance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, r#"{"123": "lots"}"#).unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(LedgerError::Corrupt(_))));
    }

    #[test]
    fn test_memory_store_failing_mode() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.persist(&[("a".to_string(), 1)]).is_err());
        assert_eq!(store.writes(), 0);
        store.set_fail_writes(false);
        store.persist(&[("a".to_string(), 1)]).unwrap();
        assert_eq!(store.writes(), 1);
        assert_eq!(store.snapshot(), vec![("a".to_string(), 1)]);
    }
}
