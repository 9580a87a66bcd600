//! Operation descriptors
//!
//! Each operation carries a name and a description so a calling agent
//! can discover what it does.

/// Name and description of an invocable operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub description: &'static str,
}

pub const ADD_ROAD_REPORT: Operation = Operation {
    name: "add_road_report",
    description: "Adds a new road condition report. Requires latitude, longitude, \
                  condition type, severity, and comments.",
};

pub const GET_ALL_REPORTS: Operation = Operation {
    name: "get_all_reports",
    description: "Retrieves a summary of the most recent road condition reports.",
};

/// Every operation the service exposes
pub const OPERATIONS: [Operation; 2] = [ADD_ROAD_REPORT, GET_ALL_REPORTS];
