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

use super::domain::{CampaignId, ClientId};
use super::filter::FilterSpec;
use super::normalizer::RawSnapshot;
use super::repository::{RepositoryError, SnapshotRepository};
use super::service::{AnalyticsServiceError, PositivationService};

/// Router exposing snapshot publishing and the campaign views.
pub fn analytics_router<R>(service: Arc<PositivationService<R>>) -> Router
where
    R: SnapshotRepository + 'static,
{
    Router::new()
        .route("/api/v1/snapshots", post(publish_handler::<R>))
        .route(
            "/api/v1/campaigns/:campaign_id/report",
            post(report_handler::<R>),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/cities",
            get(cities_handler::<R>),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/rankings",
            get(rankings_handler::<R>),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/clients/:client_id/scorecard",
            get(scorecard_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RankingQuery {
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn publish_handler<R>(
    State(service): State<Arc<PositivationService<R>>>,
    axum::Json(raw): axum::Json<RawSnapshot>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    match service.publish(&raw) {
        Ok(summary) => (StatusCode::CREATED, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<PositivationService<R>>>,
    Path(campaign_id): Path<String>,
    axum::Json(filter): axum::Json<FilterSpec>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    match service.report(&CampaignId(campaign_id), &filter) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn cities_handler<R>(
    State(service): State<Arc<PositivationService<R>>>,
    Path(campaign_id): Path<String>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    match service.city_rollups(&CampaignId(campaign_id)) {
        Ok(rollups) => (StatusCode::OK, axum::Json(rollups)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rankings_handler<R>(
    State(service): State<Arc<PositivationService<R>>>,
    Path(campaign_id): Path<String>,
    Query(query): Query<RankingQuery>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    match service.rankings(&CampaignId(campaign_id), query.limit) {
        Ok(rankings) => (StatusCode::OK, axum::Json(rankings)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn scorecard_handler<R>(
    State(service): State<Arc<PositivationService<R>>>,
    Path((campaign_id, client_id)): Path<(String, String)>,
) -> Response
where
    R: SnapshotRepository + 'static,
{
    match service.scorecard(&CampaignId(campaign_id), &ClientId(client_id)) {
        Ok(scorecard) => (StatusCode::OK, axum::Json(scorecard)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AnalyticsServiceError) -> Response {
    let status = match &error {
        AnalyticsServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalyticsServiceError::CampaignNotFound(_)
        | AnalyticsServiceError::ClientNotFound(_)
        | AnalyticsServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AnalyticsServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
