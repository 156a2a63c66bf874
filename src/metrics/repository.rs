//! Typed data-access wrapper over the metrics store
//!
//! Exposes exactly the queries the service needs: full listing, exact-key
//! lookup, upsert, and the three single-counter projections. Missing keys are
//! `None`; there is no validation and no derived computation here.

use std::sync::Arc;

use crate::store::{CounterField, MetricsRecord, MetricsStore, StoreResult};

/// Repository over an explicit store handle.
#[derive(Clone)]
pub struct MetricsRepository {
    store: Arc<MetricsStore>,
}

impl MetricsRepository {
    pub fn new(store: Arc<MetricsStore>) -> Self {
        Self { store }
    }

    pub fn get_all(&self) -> Vec<MetricsRecord> {
        self.store.find_all()
    }

    pub fn get_by_name(&self, api_name: &str) -> Option<MetricsRecord> {
        self.store.find_by_name(api_name)
    }

    /// Insert-or-replace by `api_name`.
    pub fn upsert(&self, record: MetricsRecord) -> StoreResult<()> {
        self.store.save(record)
    }

    pub fn total_hits(&self, api_name: &str) -> Option<i64> {
        self.store.find_counter(api_name, CounterField::Total)
    }

    pub fn successful_hits(&self, api_name: &str) -> Option<i64> {
        self.store.find_counter(api_name, CounterField::Successful)
    }

    pub fn failed_hits(&self, api_name: &str) -> Option<i64> {
        self.store.find_counter(api_name, CounterField::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_repository() -> (TempDir, MetricsRepository) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = Arc::new(MetricsStore::open(dir.path()).unwrap());
        (dir, MetricsRepository::new(store))
    }

    #[test]
    fn test_upsert_then_get_returns_equal_record() {
        let (_dir, repo) = temp_repository();
        let record = MetricsRecord::new("search", 10, 8, 2);
        repo.upsert(record.clone()).unwrap();

        assert_eq!(repo.get_by_name("search"), Some(record));
    }

    #[test]
    fn test_unknown_name_is_none_everywhere() {
        let (_dir, repo) = temp_repository();

        assert_eq!(repo.get_by_name("unknown-api"), None);
        assert_eq!(repo.total_hits("unknown-api"), None);
        assert_eq!(repo.successful_hits("unknown-api"), None);
        assert_eq!(repo.failed_hits("unknown-api"), None);
    }

    #[test]
    fn test_scalar_projections() {
        let (_dir, repo) = temp_repository();
        repo.upsert(MetricsRecord::new("search", 10, 8, 2)).unwrap();

        assert_eq!(repo.total_hits("search"), Some(10));
        assert_eq!(repo.successful_hits("search"), Some(8));
        assert_eq!(repo.failed_hits("search"), Some(2));
    }

    #[test]
    fn test_second_upsert_fully_overwrites() {
        let (_dir, repo) = temp_repository();
        repo.upsert(MetricsRecord::new("search", 10, 8, 2)).unwrap();
        repo.upsert(MetricsRecord::new("search", 15, 10, 5)).unwrap();

        // Overwrite, not increment
        assert_eq!(repo.total_hits("search"), Some(15));
        assert_eq!(repo.get_all().len(), 1);
    }
}
