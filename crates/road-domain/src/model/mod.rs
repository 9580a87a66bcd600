//! Domain Models
//!
//! A Report is the only entity. Everything else here is a value object
//! describing one of its fields.

pub mod field;
pub mod report;
pub mod timestamp;
