use crate::analytics::aggregate::{aggregate_industries, IndustryStat, ProductStat};
use crate::analytics::domain::{Campaign, Client, Money};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRollup {
    pub city: String,
    pub client_count: usize,
    pub total_value: Money,
    pub positivated_count: usize,
    /// Product breakdown for the city, grouped by industry.
    pub industries: Vec<IndustryStat>,
}

impl CityRollup {
    pub fn product(&self, industry: &str, product: &str) -> Option<&ProductStat> {
        self.industries
            .iter()
            .find(|stat| stat.name == industry)
            .and_then(|stat| stat.product(product))
    }
}

/// Groups clients by their normalized city. Only cities present in the data appear, ordered
/// by name; clients without a city are left out.
pub fn city_rollups(campaign: &Campaign, clients: &[Client]) -> Vec<CityRollup> {
    let mut by_city: BTreeMap<&str, Vec<&Client>> = BTreeMap::new();
    for client in clients {
        if client.city.is_empty() {
            continue;
        }
        by_city.entry(client.city.as_str()).or_default().push(client);
    }

    by_city
        .into_iter()
        .map(|(city, members)| {
            let industries = aggregate_industries(campaign, &members);
            CityRollup {
                city: city.to_string(),
                client_count: members.len(),
                total_value: industries.iter().map(|stat| stat.total_value).sum(),
                positivated_count: industries
                    .iter()
                    .map(|stat| stat.positivated_product_count)
                    .sum(),
                industries,
            }
        })
        .collect()
}

/// Distinct non-blank cities, sorted.
pub fn cities(clients: &[Client]) -> Vec<String> {
    let mut cities: Vec<String> = clients
        .iter()
        .filter(|client| !client.city.is_empty())
        .map(|client| client.city.clone())
        .collect();
    cities.sort();
    cities.dedup();
    cities
}
