//! Persistence Adapters - Repository implementations
//!
//! These implement [`road_domain::ReportRepository`].

pub mod document;
pub mod in_memory;
pub mod mongo;

pub use document::ReportDocument;
pub use in_memory::InMemoryReportRepository;
pub use mongo::MongoReportRepository;
