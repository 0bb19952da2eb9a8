use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-service totals inside a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceUsage {
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub tokens: u64,
    /// Present in session breakdowns
    #[serde(default)]
    pub count: u64,
    /// Present in global statistics breakdowns
    #[serde(default)]
    pub operations: u64,
}

impl ServiceUsage {
    /// Number of calls, whichever way the backend named it
    pub fn calls(&self) -> u64 {
        self.count.max(self.operations)
    }
}

/// Per-operation totals ("case_generation", "character_question", ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationUsage {
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub tokens: u64,
    #[serde(default)]
    pub count: u64,
}

/// Real-time usage of one play session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUsage {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub service_breakdown: BTreeMap<String, ServiceUsage>,
    #[serde(default)]
    pub operation_count: u64,
}

/// Usage aggregated over the backend's reporting window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStatistics {
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub service_breakdown: BTreeMap<String, ServiceUsage>,
    #[serde(default)]
    pub operation_breakdown: BTreeMap<String, OperationUsage>,
    #[serde(default)]
    pub session_count: u64,
    #[serde(default)]
    pub case_count: u64,
    #[serde(default)]
    pub average_cost_per_case: f64,
    #[serde(default)]
    pub last_updated: String,
}

/// Whether a session is still within its cost and call budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub within_limits: bool,
    #[serde(default)]
    pub cost_limit_exceeded: bool,
    #[serde(default)]
    pub operations_limit_exceeded: bool,
    #[serde(default)]
    pub current_cost: f64,
    #[serde(default)]
    pub max_cost: f64,
    #[serde(default)]
    pub recent_operations: u64,
    #[serde(default)]
    pub max_operations: u64,
}

impl RateLimitStatus {
    /// Fraction of the cost budget consumed, clamped to `0.0..=1.0`
    pub fn cost_ratio(&self) -> f64 {
        if self.max_cost <= 0.0 {
            return 0.0;
        }
        (self.current_cost / self.max_cost).clamp(0.0, 1.0)
    }
}

/// One logged AI call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub id: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub model_used: Option<String>,
    #[serde(default)]
    pub prompt_length: u64,
    #[serde(default)]
    pub response_length: u64,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
}

fn default_success() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_parse_backend_shape() {
        let stats: UsageStatistics = serde_json::from_str(
            r#"{
                "total_cost": 1.25,
                "total_tokens": 5000,
                "service_breakdown": {"openai": {"cost": 1.0, "tokens": 4000, "operations": 3}},
                "operation_breakdown": {"case_generation": {"cost": 1.0, "tokens": 4000, "count": 1}},
                "session_count": 2,
                "case_count": 1,
                "average_cost_per_case": 1.25,
                "last_updated": "2024-05-01T10:00:00"
            }"#,
        )
        .unwrap();

        assert_eq!(stats.service_breakdown["openai"].calls(), 3);
        assert_eq!(stats.operation_breakdown["case_generation"].count, 1);
    }

    #[test]
    fn cost_ratio_is_clamped() {
        let status = RateLimitStatus {
            within_limits: false,
            current_cost: 7.5,
            max_cost: 5.0,
            ..Default::default()
        };
        assert_eq!(status.cost_ratio(), 1.0);
        assert_eq!(RateLimitStatus::default().cost_ratio(), 0.0);
    }

    #[test]
    fn record_success_defaults_to_true() {
        let record: UsageRecord =
            serde_json::from_str(r#"{"id":"u1","service":"anthropic"}"#).unwrap();
        assert!(record.success);
        assert!(record.total_tokens.is_none());
    }
}
