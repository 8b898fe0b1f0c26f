use super::common::*;
use crate::analytics::domain::{CampaignId, ClientId};
use crate::analytics::filter::FilterSpec;
use crate::analytics::normalizer::{RawSnapshot, ValidationError};
use crate::analytics::ranking::RankingConfig;
use crate::analytics::repository::RepositoryError;
use crate::analytics::service::{AnalyticsServiceError, PositivationService};
use std::sync::Arc;

fn raw_snapshot() -> RawSnapshot {
    serde_json::from_value(raw_snapshot_json()).expect("raw snapshot decodes")
}

fn campaign_id() -> CampaignId {
    CampaignId("camp-verao".to_string())
}

#[test]
fn publish_normalizes_and_stores_the_snapshot() {
    let (service, repository) = build_service();

    let summary = service.publish(&raw_snapshot()).expect("publish succeeds");

    assert_eq!(summary.id, campaign_id());
    assert_eq!(summary.product_count, 2);
    assert_eq!(repository.len(), 1);

    let report = service
        .report(&campaign_id(), &FilterSpec::default())
        .expect("report builds");
    assert_eq!(report.industries[0].total_value, reais(900));
    assert_eq!(report.overview.fully_complete_clients, 1);
}

#[test]
fn invalid_snapshots_are_never_stored() {
    let (service, repository) = build_service();
    let mut raw = raw_snapshot();
    raw.clients[1].id = None;

    match service.publish(&raw) {
        Err(AnalyticsServiceError::Validation(ValidationError::MissingClientId { index })) => {
            assert_eq!(index, 1)
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(repository.len(), 0);
}

#[test]
fn unknown_campaign_is_reported() {
    let (service, _) = build_service();

    match service.city_rollups(&CampaignId("missing".to_string())) {
        Err(AnalyticsServiceError::CampaignNotFound(id)) => assert_eq!(id.0, "missing"),
        other => panic!("expected missing campaign, got {other:?}"),
    }
}

#[test]
fn scorecard_looks_up_a_single_client() {
    let (service, _) = build_service();
    service.publish(&raw_snapshot()).expect("publish succeeds");

    let card = service
        .scorecard(&campaign_id(), &ClientId("A".to_string()))
        .expect("scorecard builds");
    assert_eq!(card.missing_products["Bebidas"], vec!["Brahma".to_string()]);

    match service.scorecard(&campaign_id(), &ClientId("Z".to_string())) {
        Err(AnalyticsServiceError::ClientNotFound(id)) => assert_eq!(id.0, "Z"),
        other => panic!("expected missing client, got {other:?}"),
    }
}

#[test]
fn rankings_cover_every_client_and_honor_limit_override() {
    let (service, _) = build_service();
    service.publish(&raw_snapshot()).expect("publish succeeds");

    let rankings = service.rankings(&campaign_id(), None).expect("rankings build");
    assert_eq!(rankings.top_clients.len(), 2);
    assert_eq!(rankings.top_clients[0].client_id.0, "B");
    assert_eq!(rankings.top_products[0].product, "Skol");

    let rankings = service
        .rankings(&campaign_id(), Some(1))
        .expect("rankings build");
    assert_eq!(rankings.top_clients.len(), 1);
    assert_eq!(rankings.top_products.len(), 1);
}

#[test]
fn repository_outages_propagate() {
    let service =
        PositivationService::new(Arc::new(UnavailableRepository), RankingConfig::default());

    match service.publish(&raw_snapshot()) {
        Err(AnalyticsServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "document store offline")
        }
        other => panic!("expected repository outage, got {other:?}"),
    }
    assert!(matches!(
        service.report(&campaign_id(), &FilterSpec::default()),
        Err(AnalyticsServiceError::Repository(_))
    ));
}
