use casebook_domain::{CaseId, CharacterId, EvidenceId};
use serde::Serialize;

/// Body of `POST /api/question-character`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRequest {
    pub case_id: CaseId,
    pub character_id: CharacterId,
    pub question: String,
}

/// Body of `POST /api/analyze-evidence`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub case_id: CaseId,
    pub evidence_ids: Vec<EvidenceId>,
    pub theory: String,
}
