//! Tool handlers exposed over MCP
//!
//! The two report operations plus the informational `about` and
//! `open_map_view` tools.

use std::sync::Arc;

use async_trait::async_trait;
use road_domain::{FieldValue, ReportRepository, ReportSubmission};
use road_usecase::{messages, Reply, ReportService, ADD_ROAD_REPORT, GET_ALL_REPORTS};
use serde_json::{json, Value};
use shared::{CallToolResult, ServerSection, Tool};
use tracing::warn;

/// Argument order for positional `add_road_report` calls
const REPORT_FIELDS: [&str; 5] = [
    "latitude",
    "longitude",
    "road_condition_type",
    "severity",
    "comments",
];

/// A callable tool
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name, description and input schema
    fn definition(&self) -> Tool;

    async fn call(&self, arguments: Value) -> CallToolResult;
}

/// Tools in registration order
#[derive(Default)]
pub struct ToolRegistry {
    handlers: Vec<Box<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler; a later handler with the same name replaces the earlier one
    pub fn register(&mut self, handler: impl ToolHandler + 'static) {
        let name = handler.definition().name;
        self.handlers.retain(|h| h.definition().name != name);
        self.handlers.push(Box::new(handler));
    }

    pub fn definitions(&self) -> Vec<Tool> {
        self.handlers.iter().map(|h| h.definition()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn ToolHandler> {
        self.handlers
            .iter()
            .find(|h| h.definition().name == name)
            .map(|h| h.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.definitions().into_iter().map(|t| t.name).collect();
        f.debug_struct("ToolRegistry").field("tools", &names).finish()
    }
}

/// Registry with every tool the server offers
pub fn report_tools<R>(service: Arc<ReportService<R>>, server: &ServerSection) -> ToolRegistry
where
    R: ReportRepository + 'static,
{
    let mut registry = ToolRegistry::new();
    registry.register(AboutTool {
        name: server.name.clone(),
        description: server.description.clone(),
    });
    registry.register(AddRoadReportTool {
        service: service.clone(),
    });
    registry.register(GetAllReportsTool { service });
    if let Some(url) = &server.map_url {
        registry.register(OpenMapViewTool { url: url.clone() });
    }
    registry
}

// ========== Argument conversion ==========

fn field_value(value: &Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Missing,
        Value::Bool(b) => FieldValue::Bool(*b),
        Value::Number(n) => n
            .as_f64()
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Unsupported("number")),
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Array(_) => FieldValue::Unsupported("array"),
        Value::Object(_) => FieldValue::Unsupported("object"),
    }
}

/// Accepts named (`{"latitude": ..}`) or positional (`[lat, lon, ..]`) arguments
fn submission_from_arguments(arguments: &Value) -> Result<ReportSubmission, String> {
    let mut fields: [FieldValue; 5] = Default::default();

    match arguments {
        Value::Null => {}
        Value::Object(map) => {
            for (slot, name) in fields.iter_mut().zip(REPORT_FIELDS) {
                *slot = map.get(name).map(field_value).unwrap_or_default();
            }
        }
        Value::Array(values) if values.len() <= REPORT_FIELDS.len() => {
            for (slot, value) in fields.iter_mut().zip(values) {
                *slot = field_value(value);
            }
        }
        Value::Array(values) => {
            return Err(format!(
                "expected at most {} positional arguments, got {}",
                REPORT_FIELDS.len(),
                values.len()
            ));
        }
        other => return Err(format!("arguments must be an object or array, got {}", other)),
    }

    let [latitude, longitude, road_condition_type, severity, comments] = fields;
    Ok(ReportSubmission {
        latitude,
        longitude,
        road_condition_type,
        severity,
        comments,
    })
}

// ========== Report tools ==========

fn tool_result(reply: Reply) -> CallToolResult {
    if reply.failed {
        CallToolResult::error(reply.text)
    } else {
        CallToolResult::text(reply.text)
    }
}

pub struct AddRoadReportTool<R> {
    service: Arc<ReportService<R>>,
}

#[async_trait]
impl<R: ReportRepository + 'static> ToolHandler for AddRoadReportTool<R> {
    fn definition(&self) -> Tool {
        Tool::new(ADD_ROAD_REPORT.name)
            .with_description(ADD_ROAD_REPORT.description)
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "latitude": {
                        "type": "number",
                        "description": "The latitude of the report location."
                    },
                    "longitude": {
                        "type": "number",
                        "description": "The longitude of the report location."
                    },
                    "road_condition_type": {
                        "type": "string",
                        "description": "The type of road condition (e.g., pothole, crack, flooding)."
                    },
                    "severity": {
                        "type": "string",
                        "description": "The severity of the condition (e.g., minor, moderate, severe)."
                    },
                    "comments": {
                        "type": "string",
                        "description": "Additional comments about the issue."
                    }
                },
                "required": REPORT_FIELDS
            }))
    }

    async fn call(&self, arguments: Value) -> CallToolResult {
        let submission = match submission_from_arguments(&arguments) {
            Ok(submission) => submission,
            Err(reason) => {
                warn!(%reason, "Malformed add_road_report arguments");
                return CallToolResult::error(messages::SAVE_FAILED);
            }
        };

        tool_result(self.service.save(&submission).await)
    }
}

pub struct GetAllReportsTool<R> {
    service: Arc<ReportService<R>>,
}

#[async_trait]
impl<R: ReportRepository + 'static> ToolHandler for GetAllReportsTool<R> {
    fn definition(&self) -> Tool {
        Tool::new(GET_ALL_REPORTS.name).with_description(GET_ALL_REPORTS.description)
    }

    async fn call(&self, _arguments: Value) -> CallToolResult {
        tool_result(self.service.fetch().await)
    }
}

// ========== Informational tools ==========

pub struct AboutTool {
    name: String,
    description: String,
}

#[async_trait]
impl ToolHandler for AboutTool {
    fn definition(&self) -> Tool {
        Tool::new("about").with_description("Describes this server and what it is for.")
    }

    async fn call(&self, _arguments: Value) -> CallToolResult {
        let about = json!({
            "name": self.name,
            "description": self.description,
        });
        CallToolResult::text(about.to_string())
    }
}

pub struct OpenMapViewTool {
    url: String,
}

#[async_trait]
impl ToolHandler for OpenMapViewTool {
    fn definition(&self) -> Tool {
        Tool::new("open_map_view")
            .with_description("Provides the public link to the interactive web app map.")
    }

    async fn call(&self, _arguments: Value) -> CallToolResult {
        CallToolResult::text(format!(
            "Here is the link to the live map of all road issues: {}",
            self.url
        ))
    }
}
