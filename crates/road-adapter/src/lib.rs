//! # Roadwatch Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `controller/` - Inbound adapters (MCP over stdio)
//! - `repository/` - Persistence implementations (MongoDB, in-memory)

pub mod controller;
pub mod repository;
