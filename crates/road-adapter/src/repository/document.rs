//! Persisted shape of a Report in the `reports` collection
//!
//! ```text
//! { _id, latitude?, longitude?, road_condition_type?, severity?, comments?, timestamp }
//! ```
//!
//! Absent fields are left out of the document rather than stored as null.

use mongodb::bson::{oid::ObjectId, DateTime};
use road_domain::{Report, ReportId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_condition_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    /// Always written; older documents without it fall back to the id's
    /// creation time on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime>,
}

impl ReportDocument {
    /// Document for a report that has not been stored yet
    ///
    /// The id is left for the server to assign.
    pub fn from_report(report: &Report) -> Self {
        Self {
            id: None,
            latitude: report.latitude(),
            longitude: report.longitude(),
            road_condition_type: report.road_condition_type().map(str::to_string),
            severity: report.severity().map(str::to_string),
            comments: report.comments().map(str::to_string),
            timestamp: Some(DateTime::from_millis(report.timestamp().as_millis())),
        }
    }

    pub fn into_report(self) -> Report {
        let timestamp = self
            .timestamp
            .or_else(|| self.id.map(|oid| oid.timestamp()))
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_default();

        let mut report = Report::new(Timestamp::from_millis(timestamp))
            .with_latitude(self.latitude)
            .with_longitude(self.longitude);

        if let Some(condition) = self.road_condition_type {
            report = report.with_condition(condition);
        }
        if let Some(severity) = self.severity {
            report = report.with_severity(severity);
        }
        if let Some(comments) = self.comments {
            report = report.with_comments(comments);
        }
        if let Some(oid) = self.id {
            report = report.with_id(ReportId::new(oid.to_hex()));
        }
        report
    }
}
