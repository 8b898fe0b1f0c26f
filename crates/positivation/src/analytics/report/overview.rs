use crate::analytics::aggregate::ratio;
use crate::analytics::domain::{Campaign, Money};
use crate::analytics::scorecard::ClientScorecard;
use serde::Serialize;

/// Headline metrics for the current view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignOverview {
    pub total_clients: usize,
    /// Products defined by the campaign, per client.
    pub total_products: usize,
    pub total_positivated: usize,
    /// Product slots across every client that are still open.
    pub total_not_positivated: usize,
    pub positivation_rate: f64,
    pub total_value: Money,
    pub fully_complete_clients: usize,
    pub total_goal: Money,
    pub goal_percentage: f64,
    pub cities: Vec<String>,
}

impl CampaignOverview {
    pub(crate) fn build(
        campaign: &Campaign,
        scorecards: &[ClientScorecard],
        cities: Vec<String>,
    ) -> Self {
        let total_clients = scorecards.len();
        let total_products = campaign.total_products();
        let slots = total_products * total_clients;
        let total_positivated: usize = scorecards
            .iter()
            .map(|card| card.positivated_products)
            .sum();
        let total_value: Money = scorecards.iter().map(|card| card.total_value).sum();
        let total_goal = campaign.total_goal();

        Self {
            total_clients,
            total_products,
            total_positivated,
            total_not_positivated: slots.saturating_sub(total_positivated),
            positivation_rate: ratio(total_positivated, slots),
            total_value,
            fully_complete_clients: scorecards
                .iter()
                .filter(|card| card.is_fully_complete)
                .count(),
            total_goal,
            goal_percentage: total_value.percentage_of(total_goal),
            cities,
        }
    }
}
