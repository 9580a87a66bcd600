//! # Roadwatch Use Case Layer
//!
//! The two operations callers can invoke, `add_road_report` and
//! `get_all_reports`, built on top of an injected [`ReportRepository`].
//!
//! Callers only ever see a fixed sentence per outcome. The typed
//! [`ReportServiceError`] stays inside for logs and tests.

pub mod operation;
pub mod options;
pub mod report_service;

pub use road_domain;

pub use operation::{Operation, ADD_ROAD_REPORT, GET_ALL_REPORTS, OPERATIONS};
pub use options::ReportQueryOptions;
pub use report_service::{format_summary, messages, Reply, ReportService, ReportServiceError};

#[doc(no_inline)]
pub use road_domain::ReportRepository;
