use crate::analytics::aggregate::ratio;
use crate::analytics::domain::{Campaign, Client, ClientId, Money};
use serde::Serialize;
use std::collections::BTreeMap;

/// A client's progress inside a single industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryProgress {
    pub positivated: usize,
    pub total: usize,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientScorecard {
    pub client_id: ClientId,
    pub name: String,
    pub city: String,
    pub total_products: usize,
    pub positivated_products: usize,
    pub percentage: f64,
    pub total_value: Money,
    pub industry_completion: BTreeMap<String, bool>,
    /// Products still to positivate per industry, in campaign order. Every campaign industry
    /// has an entry, empty when nothing is missing.
    pub missing_products: BTreeMap<String, Vec<String>>,
    pub industries: BTreeMap<String, IndustryProgress>,
    pub is_fully_complete: bool,
}

impl ClientScorecard {
    pub fn build(campaign: &Campaign, client: &Client) -> Self {
        let mut industry_completion = BTreeMap::new();
        let mut missing_products = BTreeMap::new();
        let mut industries = BTreeMap::new();
        let mut total_products = 0;
        let mut positivated_products = 0;
        let mut total_value = Money::ZERO;

        for industry in &campaign.industries {
            let mut progress = IndustryProgress {
                positivated: 0,
                total: industry.products.len(),
                value: Money::ZERO,
            };
            let mut missing = Vec::new();

            for product in &industry.products {
                match client.product(&industry.name, product) {
                    Some(record) if record.positivated => {
                        progress.positivated += 1;
                        progress.value = progress.value + record.counted_value();
                    }
                    _ => missing.push(product.clone()),
                }
            }

            total_products += progress.total;
            positivated_products += progress.positivated;
            total_value = total_value + progress.value;

            industry_completion.insert(
                industry.name.clone(),
                industry.has_products() && progress.positivated == progress.total,
            );
            missing_products.insert(industry.name.clone(), missing);
            industries.insert(industry.name.clone(), progress);
        }

        Self {
            client_id: client.id.clone(),
            name: client.name.clone(),
            city: client.city.clone(),
            total_products,
            positivated_products,
            percentage: ratio(positivated_products, total_products),
            total_value,
            industry_completion,
            missing_products,
            industries,
            is_fully_complete: total_products > 0 && positivated_products == total_products,
        }
    }

    pub fn missing_count(&self) -> usize {
        self.missing_products.values().map(Vec::len).sum()
    }
}

/// Scorecards in the order of `clients`.
pub fn build_scorecards(campaign: &Campaign, clients: &[&Client]) -> Vec<ClientScorecard> {
    clients
        .iter()
        .map(|client| ClientScorecard::build(campaign, client))
        .collect()
}
