mod overview;
pub mod views;

use crate::analytics::aggregate::{aggregate_industries, IndustryStat};
use crate::analytics::domain::Snapshot;
use crate::analytics::filter::FilterSpec;
use crate::analytics::geography::{cities, city_rollups, CityRollup};
use crate::analytics::ranking::{
    top_clients, top_products, RankedClient, RankedProduct, RankingConfig,
};
use crate::analytics::scorecard::{build_scorecards, ClientScorecard};
use serde::Serialize;
use tracing::debug;

pub use overview::CampaignOverview;
pub use views::{CampaignSummaryView, WarningView};

/// Every view-model for one snapshot and filter.
///
/// Industry stats, scorecards, the overview and both rankings cover the filtered clients.
/// City rollups and the overview's city list always cover the whole campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositivationReport {
    pub campaign: CampaignSummaryView,
    pub filter: FilterSpec,
    pub overview: CampaignOverview,
    pub industries: Vec<IndustryStat>,
    pub scorecards: Vec<ClientScorecard>,
    pub cities: Vec<CityRollup>,
    pub top_clients: Vec<RankedClient>,
    pub top_products: Vec<RankedProduct>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<WarningView>,
}

impl PositivationReport {
    pub fn build(snapshot: &Snapshot, filter: &FilterSpec, ranking: &RankingConfig) -> Self {
        let campaign = &snapshot.campaign;
        let view = filter.apply(campaign, &snapshot.clients);

        let industries = aggregate_industries(campaign, &view);
        let scorecards = build_scorecards(campaign, &view);
        let overview = CampaignOverview::build(campaign, &scorecards, cities(&snapshot.clients));
        let top_clients = top_clients(&scorecards, ranking.top_clients);
        let top_products = top_products(&industries, ranking.top_products);

        debug!(
            campaign = %campaign.id,
            clients = snapshot.clients.len(),
            selected = view.len(),
            "positivation report built"
        );

        Self {
            campaign: CampaignSummaryView::from_campaign(campaign),
            filter: filter.clone(),
            overview,
            industries,
            scorecards,
            cities: city_rollups(campaign, &snapshot.clients),
            top_clients,
            top_products,
            warnings: snapshot.warnings.iter().copied().map(WarningView::from).collect(),
        }
    }
}
