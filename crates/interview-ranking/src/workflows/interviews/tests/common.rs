use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::interviews::domain::{
    CandidateId, InterviewSession, RawRating, SessionId,
};
use crate::workflows::interviews::repository::{RatingSource, SourceError};
use crate::workflows::interviews::{ranking_router, ExclusionPolicy, RankingService};

pub(super) fn interview_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 14).expect("valid date")
}

pub(super) fn uniform(candidate: &str, rater: &str, score: f64) -> RawRating {
    RawRating::new(candidate, rater, Some(score), Some(score), Some(score))
}

/// Harsh rater "a" sees alice and bob; lenient rater "b" sees carol and dan.
/// Both raters spread their scores the same way, so only the offset differs.
pub(super) fn split_pool_ratings() -> Vec<RawRating> {
    vec![
        uniform("alice", "a", 62.0).with_rater_name("Dr. Harsh"),
        uniform("bob", "a", 58.0).with_rater_name("Dr. Harsh"),
        uniform("carol", "b", 80.0).with_rater_name("Dr. Kind"),
        uniform("dan", "b", 76.0).with_rater_name("Dr. Kind"),
    ]
}

pub(super) fn session(id: &str) -> InterviewSession {
    InterviewSession {
        id: SessionId::from(id),
        interview_date: interview_date(),
        candidates: vec![CandidateId::from("no-show")],
        ratings: split_pool_ratings(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySource {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, InterviewSession>>>,
}

impl MemorySource {
    pub(super) fn with_session(session: InterviewSession) -> Self {
        let source = Self::default();
        source
            .sessions
            .lock()
            .expect("source mutex poisoned")
            .insert(session.id.clone(), session);
        source
    }
}

impl RatingSource for MemorySource {
    fn session(&self, id: &SessionId) -> Result<Option<InterviewSession>, SourceError> {
        let guard = self.sessions.lock().expect("source mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableSource;

impl RatingSource for UnavailableSource {
    fn session(&self, _id: &SessionId) -> Result<Option<InterviewSession>, SourceError> {
        Err(SourceError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service(
    source: MemorySource,
    exclusion: ExclusionPolicy,
) -> Arc<RankingService<MemorySource>> {
    Arc::new(RankingService::new(Arc::new(source), exclusion))
}

pub(super) fn router_with_service(service: Arc<RankingService<MemorySource>>) -> axum::Router {
    ranking_router(service)
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
