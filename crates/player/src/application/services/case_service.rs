//! Case Service - generation, retrieval, questioning and analysis
//!
//! The only service the game controller talks to. Every method is a single
//! request; retries and polling live elsewhere.

use casebook_domain::{Case, CaseId};
use serde_json::json;
use tracing::debug;

use crate::application::api::{decode, encode_component, Api};
use crate::application::dto::{
    AnalysisRequest, AnalysisResponse, CaseEnvelope, GeneratedCase, QuestionRequest,
    QuestionResponse,
};
use crate::ports::outbound::ApiError;

#[derive(Clone)]
pub struct CaseService {
    api: Api,
}

impl CaseService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Generate a fresh case.
    ///
    /// The response must carry a non-null `case` object with a non-null `id`;
    /// anything else is reported as a parse failure.
    pub async fn generate_case(&self) -> Result<GeneratedCase, ApiError> {
        let value = self.api.post_value("/api/generate-case", &json!({})).await?;

        let has_case_id = value
            .get("case")
            .filter(|case| case.is_object())
            .and_then(|case| case.get("id"))
            .is_some_and(|id| !id.is_null());
        if !has_case_id {
            return Err(ApiError::Parse(
                "generate-case response did not include a case".to_string(),
            ));
        }

        let generated: GeneratedCase = decode(value)?;
        debug!(
            case_id = %generated.case.id,
            characters = generated.case.characters.len(),
            evidence = generated.case.evidence.len(),
            "Case generated"
        );
        Ok(generated)
    }

    /// Fetch the current server-side copy of a case
    pub async fn fetch_case(&self, case_id: &CaseId) -> Result<Case, ApiError> {
        let path = format!("/api/cases/{}", encode_component(case_id.as_str()));
        let envelope: CaseEnvelope = self.api.get(&path).await?;
        Ok(envelope.case)
    }

    pub async fn question_character(
        &self,
        request: &QuestionRequest,
    ) -> Result<QuestionResponse, ApiError> {
        self.api.post("/api/question-character", request).await
    }

    pub async fn analyze_evidence(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, ApiError> {
        self.api.post("/api/analyze-evidence", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockRawApiPort;
    use casebook_domain::CharacterId;
    use std::sync::Arc;

    fn service(raw: MockRawApiPort) -> CaseService {
        CaseService::new(Api::new(Arc::new(raw)))
    }

    #[tokio::test]
    async fn generate_case_reads_case_and_session() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, _| path == "/api/generate-case")
            .times(1)
            .returning(|_, _| {
                Ok(json!({
                    "case": {"id": "case-1", "title": "The Study", "characters": [], "evidence": []},
                    "session_id": "sess-1"
                }))
            });

        let generated = service(raw).generate_case().await.unwrap();
        assert_eq!(generated.case.id.as_str(), "case-1");
        assert_eq!(generated.session_id.unwrap().as_str(), "sess-1");
    }

    #[tokio::test]
    async fn generate_case_rejects_missing_case() {
        for body in [
            json!({}),
            json!({"case": null}),
            json!({"case": {"id": null, "title": "x"}}),
            json!({"case": "case-1"}),
        ] {
            let mut raw = MockRawApiPort::new();
            raw.expect_post_json()
                .returning(move |_, _| Ok(body.clone()));

            let result = service(raw).generate_case().await;
            assert!(matches!(result, Err(ApiError::Parse(_))), "{result:?}");
        }
    }

    #[tokio::test]
    async fn fetch_case_unwraps_envelope() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .withf(|path| path == "/api/cases/case-1")
            .returning(|_| {
                Ok(json!({"case": {"id": "case-1", "title": "The Study", "crime_scene_image_url": "https://img/c.png"}}))
            });

        let case = service(raw).fetch_case(&CaseId::new("case-1")).await.unwrap();
        assert!(case.has_crime_scene_image());
    }

    #[tokio::test]
    async fn question_character_posts_request() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| {
                path == "/api/question-character"
                    && body["character_id"] == "c2"
                    && body["question"] == "Where were you?"
            })
            .returning(|_, _| {
                Ok(json!({"character_name": "Lady Ashworth", "response": "In the library."}))
            });

        let response = service(raw)
            .question_character(&QuestionRequest {
                case_id: CaseId::new("case-1"),
                character_id: CharacterId::new("c2"),
                question: "Where were you?".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.response, "In the library.");
    }

    #[tokio::test]
    async fn http_failures_pass_through() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .returning(|_, _| Err(ApiError::from_status(500, Some("Internal Server Error"), "")));

        let err = service(raw)
            .analyze_evidence(&AnalysisRequest {
                case_id: CaseId::new("case-1"),
                evidence_ids: vec![],
                theory: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }
}
