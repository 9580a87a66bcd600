//! MongoDB Repository Implementation
//!
//! Owns the driver client for the life of the process. `connect` pings
//! once; it does not retry. A handle that failed to connect stays usable
//! as a value but fails every call with `NotConnected`.

use std::time::Duration;

use futures::TryStreamExt;
use mongodb::bson::{doc, Bson};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use road_domain::{Report, ReportId, ReportRepository, RepositoryError};
use shared::StorageSection;
use tracing::{debug, info};

use super::document::ReportDocument;

const APP_NAME: &str = "roadwatch";

#[derive(Debug, Clone)]
enum ConnectionState {
    Connected {
        client: Client,
        collection: Collection<ReportDocument>,
    },
    Disconnected {
        reason: String,
    },
}

/// Report store backed by a MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoReportRepository {
    state: ConnectionState,
}

impl MongoReportRepository {
    /// Open a client for `config.uri` and ping `config.database`
    pub async fn connect(config: &StorageSection) -> Result<Self, RepositoryError> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| RepositoryError::NotConnected {
                reason: e.to_string(),
            })?;

        let timeout = Duration::from_secs(config.connect_timeout_secs);
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        if options.app_name.is_none() {
            options.app_name = Some(APP_NAME.to_string());
        }

        let client = Client::with_options(options).map_err(|e| RepositoryError::NotConnected {
            reason: e.to_string(),
        })?;

        let database = client.database(&config.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RepositoryError::Unavailable {
                message: e.to_string(),
            })?;

        info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to MongoDB"
        );

        let collection = database.collection::<ReportDocument>(&config.collection);
        Ok(Self {
            state: ConnectionState::Connected { client, collection },
        })
    }

    /// A handle whose every operation fails with `NotConnected`
    pub fn disconnected(reason: impl Into<String>) -> Self {
        Self {
            state: ConnectionState::Disconnected {
                reason: reason.into(),
            },
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected { .. })
    }

    /// Close the driver's connection pools
    pub async fn shutdown(self) {
        if let ConnectionState::Connected { client, .. } = self.state {
            client.shutdown().await;
            info!("MongoDB client shut down");
        }
    }

    fn collection(&self) -> Result<&Collection<ReportDocument>, RepositoryError> {
        match &self.state {
            ConnectionState::Connected { collection, .. } => Ok(collection),
            ConnectionState::Disconnected { reason } => Err(RepositoryError::NotConnected {
                reason: reason.clone(),
            }),
        }
    }
}

/// Server-selection failures mean the deployment is unreachable;
/// everything else is attributed to the operation itself.
fn classify(err: MongoError, on_operation: fn(String) -> RepositoryError) -> RepositoryError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } => RepositoryError::Unavailable {
            message: err.to_string(),
        },
        _ => on_operation(err.to_string()),
    }
}

fn persistence(message: String) -> RepositoryError {
    RepositoryError::Persistence { message }
}

fn query(message: String) -> RepositoryError {
    RepositoryError::Query { message }
}

impl ReportRepository for MongoReportRepository {
    async fn insert(&self, report: &Report) -> Result<ReportId, RepositoryError> {
        let collection = self.collection()?;
        let document = ReportDocument::from_report(report);

        let result = collection
            .insert_one(&document)
            .await
            .map_err(|e| classify(e, persistence))?;

        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        debug!(report_id = %id, "Inserted report document");
        Ok(ReportId::new(id))
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<Report>, RepositoryError> {
        let collection = self.collection()?;
        // A limit of 0 means "no limit" to the server
        let limit = i64::try_from(limit.max(1)).unwrap_or(i64::MAX);

        let cursor = collection
            .find(doc! {})
            .sort(doc! { "timestamp": -1, "_id": -1 })
            .limit(limit)
            .await
            .map_err(|e| classify(e, query))?;

        let documents: Vec<ReportDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| classify(e, query))?;

        Ok(documents.into_iter().map(ReportDocument::into_report).collect())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        self.collection()?
            .count_documents(doc! {})
            .await
            .map_err(|e| classify(e, query))
    }
}
