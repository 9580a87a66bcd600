//! # Roadwatch Shared
//!
//! Common types used across the Roadwatch crates: the error type,
//! the configuration layer and MCP tool descriptors.

pub mod config;
pub mod error;
pub mod tool;

// Re-exports
pub use config::*;
pub use error::*;
pub use tool::*;
