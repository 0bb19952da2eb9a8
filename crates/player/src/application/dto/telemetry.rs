//! Envelopes around the usage and prompt-testing read models

use casebook_domain::telemetry::{
    HealthReport, PromptTestCase, RateLimitStatus, SessionUsage, TestRunSummary, TestSuite,
    UsageRecord, UsageStatistics,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionUsageEnvelope {
    pub usage: SessionUsage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsEnvelope {
    pub statistics: UsageStatistics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitsEnvelope {
    pub rate_limits: RateLimitStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordsEnvelope {
    #[serde(default)]
    pub records: Vec<UsageRecord>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestCasesEnvelope {
    #[serde(default)]
    pub test_cases: Vec<PromptTestCase>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestHistoryEnvelope {
    #[serde(default)]
    pub test_suites: Vec<TestSuite>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthReportEnvelope {
    pub report: HealthReport,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestRunEnvelope {
    pub test_suite: TestSuite,
    pub summary: TestRunSummary,
}
