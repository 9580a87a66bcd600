//! # Roadwatch Domain Layer
//!
//! Road-condition reports and the port through which they are stored.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Report, Timestamp, FieldValue coercion        ││
//! │  │  repository/- ReportRepository trait (not implementations)  ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This crate has no external dependencies. Swapping MongoDB for another
//! store only touches the adapter layer.

pub mod model;
pub mod repository;

// Re-export commonly used types
pub use model::{
    field::{CoercionError, FieldValue},
    report::{Report, ReportId, ReportSubmission},
    timestamp::Timestamp,
};

pub use repository::report_repository::{ReportRepository, RepositoryError};
