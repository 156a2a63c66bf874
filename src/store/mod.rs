//! Durable keyed storage of metrics records
//!
//! The store holds one logical row per API name. On disk it is an append-only
//! record file; in memory it keeps a key -> latest-record map, rebuilt by a
//! full checksum-verified scan when the store opens and maintained on every
//! write. Upserts append a full record (no in-place update, no merge) and the
//! latest record for a key wins.

mod checksum;
mod errors;
mod reader;
mod record;
mod writer;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

pub use checksum::compute_checksum;
pub use errors::{StoreError, StoreResult};
pub use reader::StoreReader;
pub use record::{CounterField, MetricsRecord};
pub use writer::StoreWriter;

#[derive(Debug)]
struct StoreInner {
    writer: StoreWriter,
    records: HashMap<String, MetricsRecord>,
}

/// Keyed counter store: one `MetricsRecord` per API name.
///
/// The writer and key map sit behind one lock, so concurrent upserts to the
/// same key serialize here and the last write wins.
#[derive(Debug)]
pub struct MetricsStore {
    inner: Mutex<StoreInner>,
}

impl MetricsStore {
    /// Opens the store rooted at `data_dir`, rebuilding the key map from the
    /// record file.
    ///
    /// Fails with `StoreError::Corruption` if any existing record does not
    /// verify; corruption is never skipped over.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let writer = StoreWriter::open(data_dir)?;
        let records = Self::rebuild_key_map(writer.path())?;

        Ok(Self {
            inner: Mutex::new(StoreInner { writer, records }),
        })
    }

    fn rebuild_key_map(storage_path: &Path) -> StoreResult<HashMap<String, MetricsRecord>> {
        let mut records = HashMap::new();

        let mut reader = StoreReader::open(storage_path)?;
        while let Some(record) = reader.read_next()? {
            // Latest record wins (by file order)
            records.insert(record.api_name.clone(), record);
        }

        Ok(records)
    }

    /// All records, sorted by API name for a stable listing.
    pub fn find_all(&self) -> Vec<MetricsRecord> {
        let inner = self.inner.lock().expect("store lock poisoned");
        let mut all: Vec<MetricsRecord> = inner.records.values().cloned().collect();
        all.sort_by(|a, b| a.api_name.cmp(&b.api_name));
        all
    }

    /// Exact-key lookup.
    pub fn find_by_name(&self, api_name: &str) -> Option<MetricsRecord> {
        let inner = self.inner.lock().expect("store lock poisoned");
        inner.records.get(api_name).cloned()
    }

    /// Scalar projection of a single counter.
    pub fn find_counter(&self, api_name: &str, field: CounterField) -> Option<i64> {
        let inner = self.inner.lock().expect("store lock poisoned");
        inner.records.get(api_name).map(|r| field.of(r))
    }

    /// Upsert by primary key: replaces all fields if the key exists, inserts
    /// otherwise. The append is fsynced before the map is updated.
    pub fn save(&self, record: MetricsRecord) -> StoreResult<()> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        inner.writer.write(&record)?;
        inner.records.insert(record.api_name.clone(), record);
        Ok(())
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().expect("store lock poisoned");
        inner.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
