//! Prompt Testing Service - backend prompt reliability checks

use casebook_domain::telemetry::{HealthReport, PromptTestCase, TestRunSummary, TestSuite};
use serde_json::json;
use tracing::info;

use crate::application::api::{encode_component, Api};
use crate::application::dto::{
    HealthReportEnvelope, TestCasesEnvelope, TestHistoryEnvelope, TestRunEnvelope,
};
use crate::ports::outbound::ApiError;

#[derive(Clone)]
pub struct PromptTestingService {
    api: Api,
}

impl PromptTestingService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn test_cases(&self) -> Result<Vec<PromptTestCase>, ApiError> {
        let envelope: TestCasesEnvelope = self.api.get("/api/testing/test-cases").await?;
        Ok(envelope.test_cases)
    }

    pub async fn test_history(&self) -> Result<Vec<TestSuite>, ApiError> {
        let envelope: TestHistoryEnvelope = self.api.get("/api/testing/test-history").await?;
        Ok(envelope.test_suites)
    }

    pub async fn health_report(&self) -> Result<HealthReport, ApiError> {
        let envelope: HealthReportEnvelope = self.api.get("/api/testing/health-report").await?;
        Ok(envelope.report)
    }

    /// Run the backend prompt tests; an empty filter runs every type.
    pub async fn run_tests(
        &self,
        test_types: &[String],
    ) -> Result<(TestSuite, TestRunSummary), ApiError> {
        let path = if test_types.is_empty() {
            "/api/testing/run-tests".to_string()
        } else {
            format!(
                "/api/testing/run-tests?test_types={}",
                encode_component(&test_types.join(","))
            )
        };

        let envelope: TestRunEnvelope = self.api.post(&path, &json!({})).await?;
        info!(
            tests_run = envelope.summary.tests_run,
            tests_passed = envelope.summary.tests_passed,
            "Prompt tests finished"
        );
        Ok((envelope.test_suite, envelope.summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockRawApiPort;
    use std::sync::Arc;

    #[tokio::test]
    async fn run_tests_passes_type_filter() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, _| path == "/api/testing/run-tests?test_types=case_generation%2Ccharacter_question")
            .returning(|_, _| {
                Ok(json!({
                    "test_suite": {"id": "suite-1", "name": "Manual run", "tests_run": 2, "tests_passed": 1, "results": []},
                    "summary": {"tests_run": 2, "tests_passed": 1, "tests_failed": 1, "success_rate": "50.0%"}
                }))
            });

        let service = PromptTestingService::new(Api::new(Arc::new(raw)));
        let (suite, summary) = service
            .run_tests(&["case_generation".to_string(), "character_question".to_string()])
            .await
            .unwrap();
        assert_eq!(suite.id, "suite-1");
        assert_eq!(summary.tests_failed, 1);
        assert_eq!(summary.success_rate.to_string(), "50.0%");
    }

    #[tokio::test]
    async fn health_report_unwraps_envelope() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .withf(|path| path == "/api/testing/health-report")
            .returning(|_| {
                Ok(json!({"report": {"overall_health": "healthy", "prompt_type_health": {}}}))
            });

        let service = PromptTestingService::new(Api::new(Arc::new(raw)));
        let report = service.health_report().await.unwrap();
        assert_eq!(report.overall_health, "healthy");
    }
}
