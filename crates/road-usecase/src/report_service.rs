//! ReportService - add and list road reports
//!
//! ```text
//! caller ──> add_road_report ──> submit ──> Report::from_submission
//!                                       └─> ReportRepository::insert
//! caller ──> get_all_reports ──> recent ──> ReportRepository::find_recent
//! ```
//!
//! Each operation makes exactly one storage call. Failures of any kind
//! collapse into one fixed sentence per operation.

use road_domain::{
    CoercionError, FieldValue, Report, ReportRepository, ReportSubmission, RepositoryError,
    Timestamp,
};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::options::ReportQueryOptions;

/// Fixed texts returned to callers
pub mod messages {
    pub const SAVED: &str = "Successfully saved the new road report.";
    pub const SAVE_FAILED: &str = "Sorry, there was an error saving the report.";
    pub const NO_REPORTS: &str = "No reports found.";
    pub const FETCH_FAILED: &str = "Sorry, there was an error fetching reports.";
}

/// Caller-facing text of one operation and whether it reports a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub failed: bool,
}

impl Reply {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: false,
        }
    }

    fn failed(text: &str) -> Self {
        Self {
            text: text.to_string(),
            failed: true,
        }
    }
}

/// Why an operation failed (never shown to callers)
#[derive(Debug, Error)]
pub enum ReportServiceError {
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The report service, generic over its storage handle
#[derive(Debug)]
pub struct ReportService<R> {
    repository: R,
    options: ReportQueryOptions,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repository: R, options: ReportQueryOptions) -> Self {
        Self {
            repository,
            options,
        }
    }

    pub fn options(&self) -> ReportQueryOptions {
        self.options
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Give the storage handle back, e.g. for teardown
    pub fn into_repository(self) -> R {
        self.repository
    }

    // ========== Typed operations ==========

    /// Coerce, stamp and persist one report
    pub async fn submit(
        &self,
        submission: &ReportSubmission,
    ) -> Result<Report, ReportServiceError> {
        let report = Report::from_submission(submission, Timestamp::now())?;
        let id = self.repository.insert(&report).await?;
        debug!(report_id = %id, "Stored road report");
        Ok(report.with_id(id))
    }

    /// The most recent reports, newest first, at most `options.limit()`
    pub async fn recent(&self) -> Result<Vec<Report>, ReportServiceError> {
        let reports = self.repository.find_recent(self.options.limit()).await?;
        Ok(reports)
    }

    /// Number of stored reports
    pub async fn stored_count(&self) -> Result<u64, ReportServiceError> {
        Ok(self.repository.count().await?)
    }

    // ========== Caller-facing operations ==========

    /// `add_road_report(latitude, longitude, road_condition_type, severity, comments)`
    pub async fn add_road_report(
        &self,
        latitude: impl Into<FieldValue>,
        longitude: impl Into<FieldValue>,
        road_condition_type: impl Into<FieldValue>,
        severity: impl Into<FieldValue>,
        comments: impl Into<FieldValue>,
    ) -> String {
        let submission =
            ReportSubmission::new(latitude, longitude, road_condition_type, severity, comments);
        self.add_report(&submission).await
    }

    /// Same as [`Self::add_road_report`] for an already assembled submission
    pub async fn add_report(&self, submission: &ReportSubmission) -> String {
        self.save(submission).await.text
    }

    /// `get_all_reports()`
    pub async fn get_all_reports(&self) -> String {
        self.fetch().await.text
    }

    /// Store a submission and describe the outcome
    pub async fn save(&self, submission: &ReportSubmission) -> Reply {
        match self.submit(submission).await {
            Ok(_) => Reply::ok(messages::SAVED),
            Err(ReportServiceError::Coercion(e)) => {
                warn!(error = %e, "Rejected road report");
                Reply::failed(messages::SAVE_FAILED)
            }
            Err(e) => {
                error!(error = %e, "Failed to save road report");
                Reply::failed(messages::SAVE_FAILED)
            }
        }
    }

    /// Summarize the most recent reports
    pub async fn fetch(&self) -> Reply {
        match self.recent().await {
            Ok(reports) if reports.is_empty() => Reply::ok(messages::NO_REPORTS),
            Ok(reports) => Reply::ok(format_summary(&reports)),
            Err(e) => {
                error!(error = %e, "Failed to fetch road reports");
                Reply::failed(messages::FETCH_FAILED)
            }
        }
    }
}

/// One 1-indexed line per report, in the given order
pub fn format_summary(reports: &[Report]) -> String {
    reports
        .iter()
        .enumerate()
        .map(|(i, report)| report.summary_line(i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use road_domain::ReportId;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    /// Vec-backed store; ties on timestamp resolve latest-inserted first
    #[derive(Default)]
    struct MemoryRepo {
        reports: Mutex<Vec<Report>>,
        next_id: AtomicU64,
    }

    impl ReportRepository for MemoryRepo {
        async fn insert(&self, report: &Report) -> Result<ReportId, RepositoryError> {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let id = ReportId::new(format!("r-{}", n));
            self.reports
                .lock()
                .unwrap()
                .push(report.clone().with_id(id.clone()));
            Ok(id)
        }

        async fn find_recent(&self, limit: usize) -> Result<Vec<Report>, RepositoryError> {
            let mut reports: Vec<Report> =
                self.reports.lock().unwrap().iter().rev().cloned().collect();
            reports.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
            reports.truncate(limit);
            Ok(reports)
        }

        async fn count(&self) -> Result<u64, RepositoryError> {
            Ok(self.reports.lock().unwrap().len() as u64)
        }
    }

    /// Store whose every call fails
    struct FailingRepo;

    impl ReportRepository for FailingRepo {
        async fn insert(&self, _report: &Report) -> Result<ReportId, RepositoryError> {
            Err(RepositoryError::Persistence {
                message: "connection reset".to_string(),
            })
        }

        async fn find_recent(&self, _limit: usize) -> Result<Vec<Report>, RepositoryError> {
            Err(RepositoryError::Unavailable {
                message: "server selection timed out".to_string(),
            })
        }

        async fn count(&self) -> Result<u64, RepositoryError> {
            Err(RepositoryError::Query {
                message: "connection reset".to_string(),
            })
        }
    }

    fn service() -> ReportService<MemoryRepo> {
        ReportService::new(MemoryRepo::default(), ReportQueryOptions::default())
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let service = service();

        let saved = service
            .add_road_report(37.7, -122.4, "pothole", "high", "large pothole near crosswalk")
            .await;
        assert_eq!(saved, messages::SAVED);

        let summary = service.get_all_reports().await;
        assert_eq!(
            summary.lines().next(),
            Some("1. pothole (high) - Comments: large pothole near crosswalk")
        );
    }

    #[tokio::test]
    async fn test_empty_store() {
        let service = service();

        assert_eq!(service.get_all_reports().await, messages::NO_REPORTS);
        assert_eq!(service.stored_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_identical_reports_not_deduplicated() {
        let service = service();

        for _ in 0..3 {
            service.add_road_report(18.5, 73.8, "crack", "low", "same").await;
        }

        assert_eq!(service.stored_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_limit_and_order() {
        let service = service();

        for i in 1..=7 {
            let comment = format!("report {}", i);
            service.add_road_report(18.5, 73.8, "pothole", "minor", comment).await;
        }

        let summary = service.get_all_reports().await;
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "1. pothole (minor) - Comments: report 7");
        assert_eq!(lines[4], "5. pothole (minor) - Comments: report 3");
    }

    #[tokio::test]
    async fn test_configured_limit() {
        let service = ReportService::new(MemoryRepo::default(), ReportQueryOptions::new(2));

        for i in 0..4 {
            service
                .add_road_report(None::<f64>, None::<f64>, "flooding", "high", i as i64)
                .await;
        }

        assert_eq!(service.recent().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_returns_stored_report() {
        let service = service();
        let submission = ReportSubmission::new("37.7", "-122.4", "pothole", "high", "deep");

        let report = service.submit(&submission).await.unwrap();

        assert!(report.id().is_some());
        assert_eq!(report.latitude(), Some(37.7));
    }

    #[tokio::test]
    async fn test_coercion_failure_stores_nothing() {
        let service = service();

        let result = service.add_road_report("north", "east", "pothole", "high", "bad").await;
        assert_eq!(result, messages::SAVE_FAILED);
        assert_eq!(service.stored_count().await.unwrap(), 0);

        let err = service
            .submit(&ReportSubmission::new("north", 0.0, "pothole", "high", "bad"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportServiceError::Coercion(_)));
    }

    #[tokio::test]
    async fn test_storage_failure_on_add() {
        let service = ReportService::new(FailingRepo, ReportQueryOptions::default());

        let result = service.add_road_report(37.7, -122.4, "pothole", "high", "deep").await;
        assert_eq!(result, messages::SAVE_FAILED);

        let err = service
            .submit(&ReportSubmission::new(37.7, -122.4, "pothole", "high", "deep"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReportServiceError::Repository(RepositoryError::Persistence { .. })
        ));
    }

    #[tokio::test]
    async fn test_storage_failure_on_get() {
        let service = ReportService::new(FailingRepo, ReportQueryOptions::default());

        assert_eq!(service.get_all_reports().await, messages::FETCH_FAILED);
        assert!(service.recent().await.is_err());
    }

    #[tokio::test]
    async fn test_zero_limit_still_returns_newest() {
        let service = ReportService::new(MemoryRepo::default(), ReportQueryOptions::new(0));

        service.add_road_report(1.0, 2.0, "crack", "low", "first").await;
        service.add_road_report(1.0, 2.0, "crack", "low", "second").await;

        assert_eq!(service.options().limit(), 1);
        assert_eq!(
            service.get_all_reports().await,
            "1. crack (low) - Comments: second"
        );
    }

    #[tokio::test]
    async fn test_replies_flag_failures() {
        let service = service();
        let good = ReportSubmission::new(37.7, -122.4, "pothole", "high", "deep");
        let bad = ReportSubmission::new("north", 0.0, "pothole", "high", "bad");

        assert_eq!(service.fetch().await, Reply::ok(messages::NO_REPORTS));
        assert_eq!(service.save(&good).await, Reply::ok(messages::SAVED));
        assert_eq!(service.save(&bad).await, Reply::failed(messages::SAVE_FAILED));
        assert!(!service.fetch().await.failed);

        let broken = ReportService::new(FailingRepo, ReportQueryOptions::default());
        assert_eq!(broken.save(&good).await, Reply::failed(messages::SAVE_FAILED));
        assert_eq!(broken.fetch().await, Reply::failed(messages::FETCH_FAILED));
    }

    #[test]
    fn test_format_summary_numbering() {
        let stamp = Timestamp::from_millis(1_754_000_000_000);
        let reports = vec![
            Report::new(stamp)
                .with_condition("flooding")
                .with_severity("high")
                .with_comments("underpass"),
            Report::new(stamp)
                .with_condition("crack")
                .with_severity("low")
                .with_comments("hairline"),
        ];

        assert_eq!(
            format_summary(&reports),
            "1. flooding (high) - Comments: underpass\n2. crack (low) - Comments: hairline"
        );
    }
}
