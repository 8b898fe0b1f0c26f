use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use positivation::analytics::{
    analytics_router, normalize, FilterSpec, PositivationReport, PositivationService,
    RankingConfig, RawSnapshot, SnapshotRepository,
};
use positivation::error::AppError;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Inline snapshot plus the view to compute over it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PositivationReportRequest {
    pub(crate) snapshot: RawSnapshot,
    #[serde(default)]
    pub(crate) filter: FilterSpec,
    /// Overrides both ranking sizes for this request.
    #[serde(default)]
    pub(crate) top: Option<usize>,
}

pub(crate) fn with_analytics_routes<R>(service: Arc<PositivationService<R>>) -> axum::Router
where
    R: SnapshotRepository + 'static,
{
    analytics_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/positivation/report",
            axum::routing::post(positivation_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn positivation_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PositivationReportRequest>,
) -> Result<Json<PositivationReport>, AppError> {
    let PositivationReportRequest {
        snapshot,
        filter,
        top,
    } = payload;

    let snapshot = normalize(&snapshot)?;
    let ranking = top.map(RankingConfig::uniform).unwrap_or(state.ranking);

    Ok(Json(PositivationReport::build(&snapshot, &filter, &ranking)))
}
