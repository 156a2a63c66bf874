//! Stateless service façade over the repository
//!
//! Each method forwards 1:1 to the repository with no transformation; the
//! only extra behavior is one structured log event per upsert.

use crate::observability::Logger;
use crate::store::{MetricsRecord, StoreResult};

use super::repository::MetricsRepository;

#[derive(Clone)]
pub struct MetricsService {
    repository: MetricsRepository,
}

impl MetricsService {
    pub fn new(repository: MetricsRepository) -> Self {
        Self { repository }
    }

    pub fn get_all_metrics(&self) -> Vec<MetricsRecord> {
        self.repository.get_all()
    }

    pub fn get_metrics_by_api_name(&self, api_name: &str) -> Option<MetricsRecord> {
        self.repository.get_by_name(api_name)
    }

    /// Full-replace upsert of one record.
    pub fn update_metrics(&self, record: MetricsRecord) -> StoreResult<()> {
        let api_name = record.api_name.clone();
        let total = record.total_hits.to_string();
        self.repository.upsert(record)?;
        Logger::info(
            "METRICS_UPSERT",
            &[("api_name", api_name.as_str()), ("total_hits", &total)],
        );
        Ok(())
    }

    pub fn get_total_hits(&self, api_name: &str) -> Option<i64> {
        self.repository.total_hits(api_name)
    }

    pub fn get_successful_hits(&self, api_name: &str) -> Option<i64> {
        self.repository.successful_hits(api_name)
    }

    pub fn get_failed_hits(&self, api_name: &str) -> Option<i64> {
        self.repository.failed_hits(api_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MetricsStore;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn temp_service() -> (TempDir, MetricsService) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = Arc::new(MetricsStore::open(dir.path()).unwrap());
        let service = MetricsService::new(MetricsRepository::new(store));
        (dir, service)
    }

    #[test]
    fn test_service_forwards_to_repository() {
        let (_dir, service) = temp_service();
        service
            .update_metrics(MetricsRecord::new("search", 10, 8, 2))
            .unwrap();

        assert_eq!(service.get_total_hits("search"), Some(10));
        assert_eq!(service.get_successful_hits("search"), Some(8));
        assert_eq!(service.get_failed_hits("search"), Some(2));
        assert_eq!(service.get_all_metrics().len(), 1);
    }

    #[test]
    fn test_missing_api_name_is_none() {
        let (_dir, service) = temp_service();
        assert!(service.get_metrics_by_api_name("nope").is_none());
        assert!(service.get_total_hits("nope").is_none());
    }
}
