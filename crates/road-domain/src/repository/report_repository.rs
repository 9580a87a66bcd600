//! Report Repository - Abstract persistence for Reports
//!
//! The domain only needs two things from a store: append a report,
//! and read back the newest ones. How that happens (MongoDB, memory)
//! is the adapter's business.

use core::future::Future;

use crate::model::report::{Report, ReportId};

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The store was never connected
    NotConnected { reason: String },
    /// Failed to persist
    Persistence { message: String },
    /// Failed to read
    Query { message: String },
    /// The store could not be reached in time
    Unavailable { message: String },
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotConnected { reason } => {
                write!(f, "Report store is not connected: {}", reason)
            }
            RepositoryError::Persistence { message } => {
                write!(f, "Persistence error: {}", message)
            }
            RepositoryError::Query { message } => {
                write!(f, "Query error: {}", message)
            }
            RepositoryError::Unavailable { message } => {
                write!(f, "Report store unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Report Repository Trait
///
/// This is a PORT in hexagonal architecture. Implementations must be
/// shareable across concurrent calls; no ordering is promised between
/// calls that are in flight at the same time.
pub trait ReportRepository: Send + Sync {
    /// Persist a new report and return its store-assigned id
    ///
    /// Never deduplicates: inserting the same content twice yields two records.
    fn insert(
        &self,
        report: &Report,
    ) -> impl Future<Output = Result<ReportId, RepositoryError>> + Send;

    /// The newest reports, at most `limit`, most recent first
    ///
    /// Reports sharing a timestamp come back latest-inserted first.
    fn find_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Report>, RepositoryError>> + Send;

    /// Total number of stored reports
    fn count(&self) -> impl Future<Output = Result<u64, RepositoryError>> + Send;
}
