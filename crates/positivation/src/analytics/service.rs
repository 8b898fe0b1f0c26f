use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::aggregate::aggregate_industries;
use super::domain::{CampaignId, ClientId, Snapshot};
use super::filter::FilterSpec;
use super::geography::{city_rollups, CityRollup};
use super::normalizer::{normalize, RawSnapshot, ValidationError};
use super::ranking::{top_clients, top_products, RankedClient, RankedProduct, RankingConfig};
use super::report::{CampaignSummaryView, PositivationReport};
use super::repository::{RepositoryError, SnapshotRepository};
use super::scorecard::{build_scorecards, ClientScorecard};

/// Service loading snapshots through the repository and running the engine over them.
pub struct PositivationService<R> {
    repository: Arc<R>,
    ranking: RankingConfig,
}

/// Both rankings for a campaign, computed over every client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRankings {
    pub campaign_id: CampaignId,
    pub top_clients: Vec<RankedClient>,
    pub top_products: Vec<RankedProduct>,
}

impl<R> PositivationService<R>
where
    R: SnapshotRepository + 'static,
{
    pub fn new(repository: Arc<R>, ranking: RankingConfig) -> Self {
        Self {
            repository,
            ranking,
        }
    }

    pub fn ranking(&self) -> RankingConfig {
        self.ranking
    }

    /// Normalize and store a snapshot. Invalid input is rejected before anything is written.
    pub fn publish(
        &self,
        raw: &RawSnapshot,
    ) -> Result<CampaignSummaryView, AnalyticsServiceError> {
        let snapshot = normalize(raw)?;
        let summary = CampaignSummaryView::from_campaign(&snapshot.campaign);
        let clients = snapshot.clients.len();

        self.repository.store(snapshot)?;
        info!(campaign = %summary.id, clients, "snapshot published");
        Ok(summary)
    }

    pub fn report(
        &self,
        campaign_id: &CampaignId,
        filter: &FilterSpec,
    ) -> Result<PositivationReport, AnalyticsServiceError> {
        let snapshot = self.snapshot(campaign_id)?;
        Ok(PositivationReport::build(&snapshot, filter, &self.ranking))
    }

    pub fn city_rollups(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Vec<CityRollup>, AnalyticsServiceError> {
        let snapshot = self.snapshot(campaign_id)?;
        Ok(city_rollups(&snapshot.campaign, &snapshot.clients))
    }

    /// Campaign-wide rankings; `limit` overrides the configured size of both lists.
    pub fn rankings(
        &self,
        campaign_id: &CampaignId,
        limit: Option<usize>,
    ) -> Result<CampaignRankings, AnalyticsServiceError> {
        let snapshot = self.snapshot(campaign_id)?;
        let ranking = limit.map(RankingConfig::uniform).unwrap_or(self.ranking);
        let everyone: Vec<_> = snapshot.clients.iter().collect();

        let scorecards = build_scorecards(&snapshot.campaign, &everyone);
        let industries = aggregate_industries(&snapshot.campaign, &everyone);

        Ok(CampaignRankings {
            campaign_id: snapshot.campaign.id.clone(),
            top_clients: top_clients(&scorecards, ranking.top_clients),
            top_products: top_products(&industries, ranking.top_products),
        })
    }

    pub fn scorecard(
        &self,
        campaign_id: &CampaignId,
        client_id: &ClientId,
    ) -> Result<ClientScorecard, AnalyticsServiceError> {
        let snapshot = self.snapshot(campaign_id)?;
        let client = snapshot
            .client(client_id)
            .ok_or_else(|| AnalyticsServiceError::ClientNotFound(client_id.clone()))?;
        Ok(ClientScorecard::build(&snapshot.campaign, client))
    }

    fn snapshot(&self, campaign_id: &CampaignId) -> Result<Snapshot, AnalyticsServiceError> {
        let campaign = self
            .repository
            .campaign(campaign_id)?
            .ok_or_else(|| AnalyticsServiceError::CampaignNotFound(campaign_id.clone()))?;
        let clients = self.repository.clients(campaign_id)?;
        debug!(campaign = %campaign_id, clients = clients.len(), "snapshot loaded");
        Ok(Snapshot::new(campaign, clients))
    }
}

/// Error raised by the positivation service.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("campaign {0} not found")]
    CampaignNotFound(CampaignId),
    #[error("client {0} not found")]
    ClientNotFound(ClientId),
}
