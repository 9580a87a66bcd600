//! Report - A single road-condition observation
//!
//! A Report is created once, never mutated and never deleted.
//! Every field except the timestamp is optional: callers are not
//! required to fill anything in, and coordinates are not range-checked.

use super::field::{CoercionError, FieldValue};
use super::timestamp::Timestamp;

/// Store-assigned identifier of a persisted Report
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportId(String);

impl ReportId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ReportId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five loosely typed values a caller submits
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportSubmission {
    pub latitude: FieldValue,
    pub longitude: FieldValue,
    pub road_condition_type: FieldValue,
    pub severity: FieldValue,
    pub comments: FieldValue,
}

impl ReportSubmission {
    pub fn new(
        latitude: impl Into<FieldValue>,
        longitude: impl Into<FieldValue>,
        road_condition_type: impl Into<FieldValue>,
        severity: impl Into<FieldValue>,
        comments: impl Into<FieldValue>,
    ) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            road_condition_type: road_condition_type.into(),
            severity: severity.into(),
            comments: comments.into(),
        }
    }
}

/// Report - The sole entity
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Assigned by the store on insert
    id: Option<ReportId>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    /// Free label such as "pothole" or "flooding"
    road_condition_type: Option<String>,
    /// Free label such as "high" or "minor"
    severity: Option<String>,
    comments: Option<String>,
    /// When the report was persisted
    timestamp: Timestamp,
}

impl Report {
    /// Create an empty report stamped at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            id: None,
            latitude: None,
            longitude: None,
            road_condition_type: None,
            severity: None,
            comments: None,
            timestamp,
        }
    }

    /// Build a report from a submission, casting each field
    ///
    /// Fails on the first field that cannot be cast.
    pub fn from_submission(
        submission: &ReportSubmission,
        timestamp: Timestamp,
    ) -> Result<Self, CoercionError> {
        Ok(Self {
            id: None,
            latitude: submission.latitude.to_number("latitude")?,
            longitude: submission.longitude.to_number("longitude")?,
            road_condition_type: submission
                .road_condition_type
                .to_text("road_condition_type")?,
            severity: submission.severity.to_text("severity")?,
            comments: submission.comments.to_text("comments")?,
            timestamp,
        })
    }

    // ========== Builders ==========

    pub fn with_id(mut self, id: ReportId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_latitude(mut self, latitude: Option<f64>) -> Self {
        self.latitude = latitude;
        self
    }

    pub fn with_longitude(mut self, longitude: Option<f64>) -> Self {
        self.longitude = longitude;
        self
    }

    pub fn with_condition(mut self, road_condition_type: impl Into<String>) -> Self {
        self.road_condition_type = Some(road_condition_type.into());
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    // ========== Getters ==========

    pub fn id(&self) -> Option<&ReportId> {
        self.id.as_ref()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn road_condition_type(&self) -> Option<&str> {
        self.road_condition_type.as_deref()
    }

    pub fn severity(&self) -> Option<&str> {
        self.severity.as_deref()
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    // ========== Presentation ==========

    /// One summary line, e.g. `1. pothole (high) - Comments: near crosswalk`
    ///
    /// `position` is 1-based.
    pub fn summary_line(&self, position: usize) -> String {
        format!(
            "{}. {} ({}) - Comments: {}",
            position,
            self.road_condition_type().unwrap_or("N/A"),
            self.severity().unwrap_or("N/A"),
            self.comments().unwrap_or("None"),
        )
    }
}
