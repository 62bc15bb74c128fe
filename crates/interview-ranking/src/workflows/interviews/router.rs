use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::aggregation::ExclusionPolicy;
use super::domain::{CandidateId, RawRating, SessionId};
use super::engine::RankingOptions;
use super::repository::RatingSource;
use super::service::{RankingReport, RankingService, RankingServiceError};

/// Ad-hoc ranking request carrying its own ratings.
#[derive(Debug, Deserialize)]
pub struct RankingRequest {
    pub ratings: Vec<RawRating>,
    #[serde(default)]
    pub candidates: Vec<CandidateId>,
    #[serde(default)]
    pub exclude_flagged: Option<bool>,
    #[serde(default)]
    pub include_ratings: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SessionRankingQuery {
    #[serde(default)]
    exclude_flagged: Option<bool>,
    #[serde(default)]
    include_ratings: bool,
}

/// Router builder exposing HTTP endpoints for interview ranking.
pub fn ranking_router<S>(service: Arc<RankingService<S>>) -> Router
where
    S: RatingSource + 'static,
{
    Router::new()
        .route("/api/v1/interviews/rankings", post(rank_handler::<S>))
        .route(
            "/api/v1/interviews/sessions/:session_id/rankings",
            get(session_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn rank_handler<S>(
    State(service): State<Arc<RankingService<S>>>,
    axum::Json(request): axum::Json<RankingRequest>,
) -> Response
where
    S: RatingSource + 'static,
{
    let RankingRequest {
        ratings,
        candidates,
        exclude_flagged,
        include_ratings,
    } = request;

    let options = RankingOptions {
        exclusion: exclude_flagged
            .map(ExclusionPolicy::from_flag)
            .unwrap_or_else(|| service.default_exclusion()),
        roster: candidates,
        include_ratings,
    };

    let report = RankingReport::build(&ratings, &options);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn session_handler<S>(
    State(service): State<Arc<RankingService<S>>>,
    Path(session_id): Path<String>,
    Query(query): Query<SessionRankingQuery>,
) -> Response
where
    S: RatingSource + 'static,
{
    let id = SessionId(session_id);
    let exclusion = query.exclude_flagged.map(ExclusionPolicy::from_flag);
    match service.rank_session(&id, exclusion, query.include_ratings) {
        Ok(ranking) => (StatusCode::OK, axum::Json(ranking)).into_response(),
        Err(RankingServiceError::SessionNotFound(_)) => {
            let payload = json!({
                "session_id": id.0,
                "error": "interview session not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            warn!(session = %id, error = %other, "session ranking failed");
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
