//! Configuration types for Roadwatch
//!
//! Configuration is layered: built-in defaults, then an optional
//! YAML/JSON file, then environment variables, then CLI flags
//! (applied by the binary).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::RoadwatchError;

/// Environment variable holding the MongoDB connection string
pub const ENV_MONGO_URI: &str = "MONGO_URI";
/// Environment variable overriding the database name
pub const ENV_MONGO_DATABASE: &str = "MONGO_DATABASE";
/// Environment variable holding the public map link
pub const ENV_MAP_URL: &str = "ROADWATCH_MAP_URL";

/// Identity of the MCP server as advertised to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Name reported in `initialize` and by the `about` tool
    pub name: String,

    /// Human-readable description reported by the `about` tool
    pub description: String,

    /// Public link to the live map; enables the `open_map_view` tool
    pub map_url: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: "Road Condition Reporter".to_string(),
            description: "Tools to report and retrieve information about road conditions \
                          such as potholes, cracks and waterlogging."
                .to_string(),
            map_url: None,
        }
    }
}

/// Document store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// MongoDB connection string
    pub uri: String,

    /// Database holding the report collection
    pub database: String,

    /// Collection name for reports
    pub collection: String,

    /// Server selection / connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "test".to_string(),
            collection: "reports".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Report retrieval settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsSection {
    /// How many recent reports `get_all_reports` returns
    pub limit: usize,
}

impl Default for ReportsSection {
    fn default() -> Self {
        Self { limit: 5 }
    }
}

/// Top-level configuration file (`roadwatch.yaml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub storage: StorageSection,
    pub reports: ReportsSection,
}

impl ServerConfig {
    /// Load configuration from a YAML or JSON file
    ///
    /// JSON is accepted because it parses as YAML.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup(ENV_MONGO_URI).filter(|v| !v.trim().is_empty()) {
            self.storage.uri = uri;
        }
        if let Some(database) = lookup(ENV_MONGO_DATABASE).filter(|v| !v.trim().is_empty()) {
            self.storage.database = database;
        }
        if let Some(url) = lookup(ENV_MAP_URL).filter(|v| !v.trim().is_empty()) {
            self.server.map_url = Some(url);
        }
        self
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(RoadwatchError::Config(
                "server.name must not be empty".to_string(),
            ));
        }
        if self.storage.uri.trim().is_empty() {
            return Err(RoadwatchError::Config(
                "storage.uri must not be empty".to_string(),
            ));
        }
        if self.storage.database.trim().is_empty() {
            return Err(RoadwatchError::Config(
                "storage.database must not be empty".to_string(),
            ));
        }
        if self.storage.collection.trim().is_empty() {
            return Err(RoadwatchError::Config(
                "storage.collection must not be empty".to_string(),
            ));
        }
        if self.reports.limit == 0 {
            return Err(RoadwatchError::Config(
                "reports.limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
