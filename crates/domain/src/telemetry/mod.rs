//! Backend telemetry read models (cost tracking and prompt reliability)

mod prompt_testing;
mod usage;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use prompt_testing::{
    HealthReport, PromptTestCase, PromptTestResult, PromptTypeHealth, TestRunSummary, TestSuite,
};
pub use usage::{
    OperationUsage, RateLimitStatus, ServiceUsage, SessionUsage, UsageRecord, UsageStatistics,
};

/// A figure the backend reports either as a number or as preformatted text
/// (e.g. `85.0` or `"85.0%"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(f64),
    Text(String),
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Number(0.0)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Number(n) if n.fract() == 0.0 => write!(f, "{n:.0}"),
            Metric::Number(n) => write!(f, "{n:.2}"),
            Metric::Text(s) => f.write_str(s),
        }
    }
}

/// Format a USD amount the way the dashboard shows it
pub fn format_cost(cost: f64) -> String {
    format!("${cost:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_accepts_numbers_and_text() {
        let n: Metric = serde_json::from_str("85").unwrap();
        let t: Metric = serde_json::from_str("\"85.0%\"").unwrap();
        assert_eq!(n.to_string(), "85");
        assert_eq!(t.to_string(), "85.0%");
        assert_eq!(Metric::Number(0.125).to_string(), "0.13");
    }

    #[test]
    fn cost_has_four_decimals() {
        assert_eq!(format_cost(0.5), "$0.5000");
    }
}
