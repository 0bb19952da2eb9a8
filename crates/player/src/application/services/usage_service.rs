//! Usage Service - backend cost and rate-limit telemetry

use casebook_domain::telemetry::{RateLimitStatus, SessionUsage, UsageRecord, UsageStatistics};
use casebook_domain::SessionId;

use crate::application::api::{encode_component, Api};
use crate::application::dto::{
    RateLimitsEnvelope, RecordsEnvelope, SessionUsageEnvelope, StatisticsEnvelope,
};
use crate::ports::outbound::ApiError;

#[derive(Clone)]
pub struct UsageService {
    api: Api,
}

impl UsageService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    pub async fn session_usage(&self, session_id: &SessionId) -> Result<SessionUsage, ApiError> {
        let path = format!("/api/usage/session/{}", encode_component(session_id.as_str()));
        let envelope: SessionUsageEnvelope = self.api.get(&path).await?;
        Ok(envelope.usage)
    }

    pub async fn statistics(&self) -> Result<UsageStatistics, ApiError> {
        let envelope: StatisticsEnvelope = self.api.get("/api/usage/statistics").await?;
        Ok(envelope.statistics)
    }

    pub async fn rate_limits(&self, session_id: &SessionId) -> Result<RateLimitStatus, ApiError> {
        let path = format!("/api/usage/rate-limits/{}", encode_component(session_id.as_str()));
        let envelope: RateLimitsEnvelope = self.api.get(&path).await?;
        Ok(envelope.rate_limits)
    }

    /// Recent usage records, optionally filtered to one session
    pub async fn records(&self, session_id: Option<&SessionId>) -> Result<Vec<UsageRecord>, ApiError> {
        let path = match session_id {
            Some(id) => format!("/api/usage/records?session_id={}", encode_component(id.as_str())),
            None => "/api/usage/records".to_string(),
        };
        let envelope: RecordsEnvelope = self.api.get(&path).await?;
        Ok(envelope.records)
    }
}
