//! Bounded query history
//!
//! An append-bounded, newest-first log of past queries, capped at 50
//! entries. Entries are created only on successful completion of a primary
//! request and never mutated afterwards; the only destruction is a full
//! clear. The ordered sequence is persisted through a backend port; backend
//! write failures are logged and swallowed because the in-memory list is
//! authoritative for the running session.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use pharma_assist_core::{Error, HistoryItem, QueryKind, QueryText, Result};

/// Default entry cap
pub const DEFAULT_CAPACITY: usize = 50;

/// Persistence port for the ordered history sequence
pub trait HistoryBackend: Send + Sync + 'static {
    /// Load the persisted sequence, newest first
    fn load(&self) -> Result<Vec<HistoryItem>>;

    /// Replace the persisted sequence
    fn save(&self, items: &[HistoryItem]) -> Result<()>;
}

/// JSON file backend with atomic replace-on-write
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend at the given path; parent directories are created
    /// on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<HistoryItem>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)
            .map_err(|e| Error::History(format!("read {}: {e}", self.path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::History(format!("parse {}: {e}", self.path.display())))
    }

    fn save(&self, items: &[HistoryItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::History(format!("create {}: {e}", parent.display())))?;
            }
        }

        let json = serde_json::to_vec_pretty(items)
            .map_err(|e| Error::History(format!("serialize history: {e}")))?;

        // Write to a sibling tmp file, then atomically rename over the
        // target so readers never observe a torn file.
        let tmp = tmp_path(&self.path);
        {
            let mut file = fs::File::create(&tmp)
                .map_err(|e| Error::History(format!("create {}: {e}", tmp.display())))?;
            file.write_all(&json)
                .map_err(|e| Error::History(format!("write {}: {e}", tmp.display())))?;
            file.sync_all()
                .map_err(|e| Error::History(format!("sync {}: {e}", tmp.display())))?;
        }
        fs::rename(&tmp, &self.path)
            .map_err(|e| Error::History(format!("rename {}: {e}", self.path.display())))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// In-memory backend for tests and ephemeral sessions
#[derive(Default)]
pub struct InMemoryBackend {
    items: Mutex<Vec<HistoryItem>>,
}

impl HistoryBackend for InMemoryBackend {
    fn load(&self) -> Result<Vec<HistoryItem>> {
        Ok(self.items.lock().clone())
    }

    fn save(&self, items: &[HistoryItem]) -> Result<()> {
        *self.items.lock() = items.to_vec();
        Ok(())
    }
}

/// The bounded, newest-first history store
pub struct HistoryStore {
    capacity: usize,
    items: RwLock<Vec<HistoryItem>>,
    backend: Arc<dyn HistoryBackend>,
}

impl HistoryStore {
    /// Create a store over a backend, loading whatever it already holds
    pub fn new(backend: Arc<dyn HistoryBackend>, capacity: usize) -> Self {
        let mut items = match backend.load() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load history; starting empty");
                Vec::new()
            }
        };
        items.truncate(capacity);

        Self {
            capacity,
            items: RwLock::new(items),
            backend,
        }
    }

    /// Convenience constructor for an ephemeral store at the default cap
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBackend::default()), DEFAULT_CAPACITY)
    }

    /// Record a completed query; evicts the oldest entry beyond capacity
    pub fn append(&self, kind: QueryKind, query: impl Into<QueryText>) -> HistoryItem {
        let item = HistoryItem::new(kind, query);
        let snapshot = {
            let mut items = self.items.write();
            items.insert(0, item.clone());
            items.truncate(self.capacity);
            items.clone()
        };
        self.persist(&snapshot);
        item
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.items.write().clear();
        self.persist(&[]);
    }

    /// All entries, newest first
    pub fn list(&self) -> Vec<HistoryItem> {
        self.items.read().clone()
    }

    /// Entry count
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// True when no entries are recorded
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    fn persist(&self, items: &[HistoryItem]) {
        if let Err(e) = self.backend.save(items) {
            tracing::warn!(error = %e, "Failed to persist history");
        }
    }
}
