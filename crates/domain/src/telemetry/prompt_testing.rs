use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Metric;

/// A configured prompt-reliability test
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptTestCase {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// "case_generation", "character_question", "character_detection", "evidence_analysis"
    #[serde(default)]
    pub prompt_type: String,
    /// "openai" or "anthropic"
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub description: String,
}

/// Outcome of running one test case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptTestResult {
    #[serde(default)]
    pub test_case_name: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response_received: bool,
    #[serde(default)]
    pub json_parse_success: bool,
    #[serde(default)]
    pub validation_passed: bool,
    #[serde(default)]
    pub token_count: u64,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A recorded run of several test cases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tests_run: u64,
    #[serde(default)]
    pub tests_passed: u64,
    #[serde(default)]
    pub success_rate: Metric,
    #[serde(default)]
    pub results: Vec<PromptTestResult>,
}

/// Summary block returned next to a fresh run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRunSummary {
    #[serde(default)]
    pub tests_run: u64,
    #[serde(default)]
    pub tests_passed: u64,
    #[serde(default)]
    pub tests_failed: u64,
    #[serde(default)]
    pub success_rate: Metric,
    #[serde(default)]
    pub total_cost: Metric,
    #[serde(default)]
    pub execution_time: Metric,
}

/// Health of one prompt type across recent runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptTypeHealth {
    #[serde(default)]
    pub success_rate: Metric,
    #[serde(default)]
    pub passed_tests: u64,
    #[serde(default)]
    pub total_tests: u64,
}

/// Overall prompt health; without history the backend only sends a recommendation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub overall_health: String,
    #[serde(default)]
    pub overall_success_rate: Option<Metric>,
    #[serde(default)]
    pub prompt_type_health: BTreeMap<String, PromptTypeHealth>,
    #[serde(default)]
    pub recommendation: Option<String>,
}
