//! an in-process record store
use {
    crate::{error::Result, settings::record::RawSettingsRecord, settings::remote::RecordStore},
    async_trait::async_trait,
    hashbrown::HashMap,
    std::sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

/// settings rows kept in memory, for previews and tests
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    /// rows by key
    rows: Mutex<HashMap<String, RawSettingsRecord>>,
    /// make every write fail
    fail_writes: AtomicBool,
}

impl MemoryRecordStore {
    /// an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// make writes fail (or stop failing)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// the row stored under `key`
    pub fn row(&self, key: &str) -> Option<RawSettingsRecord> {
        self.rows
            .lock()
            .ok()
            .and_then(|rows| rows.get(key).cloned())
    }

    /// the number of rows
    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    /// whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn upsert(&self, record: &RawSettingsRecord) -> Result<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            crate::bail!("record store rejected the write");
        }

        let mut rows = self
            .rows
            .lock()
            .map_err(|e| format!("record store lock poisoned: {}", e))?;
        rows.insert(record.key.clone(), record.clone());

        Ok(())
    }

    async fn fetch(&self, key: &str) -> Result<Option<RawSettingsRecord>> {
        Ok(self.row(key))
    }
}
