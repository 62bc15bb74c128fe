use crate::cli::ServeArgs;
use crate::infra::{load_session, AppState, InMemoryRatingSource};
use crate::routes::with_ranking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use interview_ranking::config::AppConfig;
use interview_ranking::error::AppError;
use interview_ranking::telemetry;
use interview_ranking::workflows::interviews::RankingService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let interview_date = args
        .interview_date
        .unwrap_or_else(|| Local::now().date_naive());
    let source = InMemoryRatingSource::default();
    for path in &args.sessions {
        let session = load_session(path, interview_date)?;
        info!(session = %session.id, ratings = session.ratings.len(), "session loaded");
        source.insert(session);
    }

    let loaded_sessions = source.len();
    let default_exclusion = config.ranking.default_exclusion();
    let ranking_service = Arc::new(RankingService::new(Arc::new(source), default_exclusion));

    let app = with_ranking_routes(ranking_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        exclusion = default_exclusion.label(),
        sessions = loaded_sessions,
        "interview ranking service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
