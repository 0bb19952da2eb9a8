//! Wire-format types exchanged with the case backend

mod requests;
mod responses;
mod telemetry;

pub use requests::{AnalysisRequest, QuestionRequest};
pub use responses::{
    AnalysisResponse, CaseEnvelope, DiscoveredCharacter, GeneratedCase, QuestionResponse,
};
pub use telemetry::{
    HealthReportEnvelope, RateLimitsEnvelope, RecordsEnvelope, SessionUsageEnvelope,
    StatisticsEnvelope, TestCasesEnvelope, TestHistoryEnvelope, TestRunEnvelope,
};
