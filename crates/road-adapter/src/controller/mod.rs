//! Inbound Adapters - Model Context Protocol controller
//!
//! ```text
//! stdin ──> stdio::serve ──> McpServer::handle ──> ToolRegistry ──> ReportService
//! stdout <──────────────────────┘
//! ```
//!
//! All logging MUST go to stderr. stdout is reserved for JSON-RPC messages.

pub mod mcp;
pub mod protocol;
pub mod stdio;
pub mod tools;

pub use mcp::McpServer;
pub use tools::{report_tools, ToolHandler, ToolRegistry};
