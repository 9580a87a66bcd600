//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait ReportRepository│  MongoReportRepository
//!   fn insert()         │  InMemoryReportRepository
//!   fn find_recent()    │
//! ```

pub mod report_repository;
