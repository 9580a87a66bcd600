//! Query options for report retrieval

/// How many reports `get_all_reports` returns by default
pub const DEFAULT_REPORT_LIMIT: usize = 5;

/// Options applied to every `get_all_reports` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQueryOptions {
    limit: usize,
}

impl ReportQueryOptions {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    /// Maximum number of reports returned, never below 1
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for ReportQueryOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_REPORT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_is_five() {
        assert_eq!(ReportQueryOptions::default().limit(), 5);
    }

    #[test]
    fn test_zero_limit_clamped() {
        assert_eq!(ReportQueryOptions::new(0).limit(), 1);
        assert_eq!(ReportQueryOptions::new(20).limit(), 20);
    }
}
