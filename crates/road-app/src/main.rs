//! # Roadwatch - Road-condition report MCP server
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Loads: ServerConfig (file → env → CLI flags)            │
//! │    ├── Creates: MongoReportRepository / InMemory (adapter)     │
//! │    ├── Creates: ReportService (use case)                       │
//! │    ├── Runs: McpServer over stdio until EOF                    │
//! │    └── Tears down: the MongoDB client                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use road_adapter::controller::{report_tools, stdio::run_stdio_server, McpServer};
use road_adapter::repository::{InMemoryReportRepository, MongoReportRepository};
use road_domain::ReportRepository;
use road_usecase::{ReportQueryOptions, ReportService};
use shared::ServerConfig;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "roadwatch")]
#[command(about = "Road-condition report server speaking MCP over stdio")]
#[command(version)]
struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, env = "ROADWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// MongoDB connection string (overrides config and MONGO_URI)
    #[arg(long)]
    mongo_uri: Option<String>,

    /// Keep reports in memory instead of MongoDB
    #[arg(long)]
    in_memory: bool,

    /// Number of reports returned by get_all_reports
    #[arg(long)]
    limit: Option<usize>,
}

/// Defaults, then the config file, then the environment, then CLI flags
fn load_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    }
    .with_env_overrides();

    if let Some(uri) = &cli.mongo_uri {
        config.storage.uri = uri.clone();
    }
    if let Some(limit) = cli.limit {
        config.reports.limit = limit;
    }

    config.validate()?;
    Ok(config)
}

async fn serve<R>(repository: R, config: &ServerConfig) -> anyhow::Result<()>
where
    R: ReportRepository + 'static,
{
    let options = ReportQueryOptions::new(config.reports.limit);
    let service = Arc::new(ReportService::new(repository, options));
    let tools = report_tools(service, &config.server);
    let server = McpServer::new(config.server.name.clone(), env!("CARGO_PKG_VERSION"), tools);

    info!(
        server = %server.info().name,
        limit = options.limit(),
        "Serving road report tools"
    );
    run_stdio_server(&server).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries protocol messages, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if cli.in_memory {
        warn!("Using in-memory report store; reports are lost on exit");
        return serve(InMemoryReportRepository::new(), &config).await;
    }

    let repository = match MongoReportRepository::connect(&config.storage).await {
        Ok(repository) => repository,
        Err(e) => {
            // Keep serving; every report operation will answer with its failure text
            error!(error = %e, "MongoDB connection error");
            MongoReportRepository::disconnected(e.to_string())
        }
    };

    let result = serve(repository.clone(), &config).await;
    repository.shutdown().await;
    result
}
