//! In-Memory Repository Implementation
//!
//! Keeps reports in insertion order for the lifetime of the process.
//! Useful for testing and for running without a database.

use std::sync::{Arc, RwLock};

use road_domain::{Report, ReportId, ReportRepository, RepositoryError};
use uuid::Uuid;

/// In-memory Report Repository
///
/// Thread-safe implementation using RwLock. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportRepository {
    reports: Arc<RwLock<Vec<Report>>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self {
            reports: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl ReportRepository for InMemoryReportRepository {
    async fn insert(&self, report: &Report) -> Result<ReportId, RepositoryError> {
        let mut reports = self.reports.write().map_err(|_| RepositoryError::Persistence {
            message: "Failed to acquire write lock".to_string(),
        })?;
        let id = ReportId::new(Uuid::new_v4().to_string());
        reports.push(report.clone().with_id(id.clone()));
        Ok(id)
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<Report>, RepositoryError> {
        let reports = self.reports.read().map_err(|_| RepositoryError::Query {
            message: "Failed to acquire read lock".to_string(),
        })?;

        // Newest insertion first, then a stable sort keeps that order for ties
        let mut recent: Vec<Report> = reports.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let reports = self.reports.read().map_err(|_| RepositoryError::Query {
            message: "Failed to acquire read lock".to_string(),
        })?;
        Ok(reports.len() as u64)
    }
}
