use crate::analytics::aggregate::IndustryStat;
use crate::analytics::domain::{ClientId, Money};
use crate::analytics::scorecard::ClientScorecard;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_TOP_N: usize = 10;

/// How many entries each ranking keeps. Zero yields an empty ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub top_clients: usize,
    pub top_products: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_clients: DEFAULT_TOP_N,
            top_products: DEFAULT_TOP_N,
        }
    }
}

impl RankingConfig {
    pub fn uniform(limit: usize) -> Self {
        Self {
            top_clients: limit,
            top_products: limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedClient {
    pub rank: usize,
    pub client_id: ClientId,
    pub name: String,
    pub city: String,
    pub total_value: Money,
    pub percentage: f64,
    pub is_fully_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProduct {
    pub rank: usize,
    pub industry: String,
    pub product: String,
    pub positivated_count: usize,
    pub total_value: Money,
}

/// Highest value first; ties go to the lower client id.
pub fn top_clients(scorecards: &[ClientScorecard], limit: usize) -> Vec<RankedClient> {
    let mut ordered: Vec<&ClientScorecard> = scorecards.iter().collect();
    ordered.sort_by(|a, b| by_value_then_id(a, b));

    ordered
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, card)| RankedClient {
            rank: index + 1,
            client_id: card.client_id.clone(),
            name: card.name.clone(),
            city: card.city.clone(),
            total_value: card.total_value,
            percentage: card.percentage,
            is_fully_complete: card.is_fully_complete,
        })
        .collect()
}

/// Most positivated first across every industry; ties go to the lexically smaller
/// `(industry, product)` pair.
pub fn top_products(industries: &[IndustryStat], limit: usize) -> Vec<RankedProduct> {
    let mut ordered: Vec<_> = industries
        .iter()
        .flat_map(|industry| industry.products.values())
        .collect();
    ordered.sort_by(|a, b| {
        b.positivated_count
            .cmp(&a.positivated_count)
            .then_with(|| a.industry.cmp(&b.industry))
            .then_with(|| a.product.cmp(&b.product))
    });

    ordered
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, stat)| RankedProduct {
            rank: index + 1,
            industry: stat.industry.clone(),
            product: stat.product.clone(),
            positivated_count: stat.positivated_count,
            total_value: stat.total_value,
        })
        .collect()
}

fn by_value_then_id(a: &ClientScorecard, b: &ClientScorecard) -> Ordering {
    b.total_value
        .cmp(&a.total_value)
        .then_with(|| a.client_id.cmp(&b.client_id))
}
