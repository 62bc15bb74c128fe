use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use interview_ranking::workflows::interviews::{ranking_router, RankingService, RatingSource};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_ranking_routes<S>(service: Arc<RankingService<S>>) -> axum::Router
where
    S: RatingSource + 'static,
{
    ranking_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "initializing")
    };

    (status, Json(json!({ "status": label })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryRatingSource;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use interview_ranking::workflows::interviews::{
        ExclusionPolicy, InterviewSession, RawRating, SessionId,
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let source = InMemoryRatingSource::default();
        source.insert(InterviewSession {
            id: SessionId::from("jan-9"),
            interview_date: NaiveDate::from_ymd_opt(2026, 1, 9).expect("valid date"),
            candidates: Vec::new(),
            ratings: vec![
                RawRating::new("c1", "r1", Some(70.0), Some(70.0), Some(70.0)),
                RawRating::new("c2", "r1", Some(60.0), Some(60.0), Some(60.0)),
            ],
        });
        let service = Arc::new(RankingService::new(
            Arc::new(source),
            ExclusionPolicy::KeepAll,
        ));
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        (with_ranking_routes(service).layer(Extension(state)), readiness)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_flag() {
        let (router, readiness) = app(false);
        let response = router
            .clone()
            .oneshot(get("/ready"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        readiness.store(true, Ordering::Release);
        let response = router.oneshot(get("/ready")).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_prometheus_text() {
        let (router, _) = app(true);
        let response = router
            .oneshot(get("/metrics"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn session_rankings_are_mounted() {
        let (router, _) = app(true);
        let response = router
            .oneshot(get("/api/v1/interviews/sessions/jan-9/rankings"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["summaries"]["c1"]["normalized_rank"], 1);
        assert_eq!(body["summaries"]["c2"]["normalized_rank"], 2);
    }
}
