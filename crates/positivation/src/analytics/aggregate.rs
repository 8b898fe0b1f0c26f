use crate::analytics::domain::{Campaign, Client, Industry, Money};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStat {
    pub industry: String,
    pub product: String,
    pub positivated_count: usize,
    pub total_value: Money,
    pub clients_considered: usize,
    pub missing_count: usize,
    pub coverage_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryStat {
    pub name: String,
    pub goal: Money,
    pub total_value: Money,
    pub goal_percentage: f64,
    /// Clients with at least one positivated product in the industry.
    pub positivated_client_count: usize,
    pub not_positivated_client_count: usize,
    pub total_client_count: usize,
    pub positivated_product_count: usize,
    /// Products in the industry times clients considered.
    pub potential_product_count: usize,
    pub products: BTreeMap<String, ProductStat>,
}

impl IndustryStat {
    pub fn product(&self, name: &str) -> Option<&ProductStat> {
        self.products.get(name)
    }
}

/// Per-industry and per-product totals over `clients`, in campaign order.
pub fn aggregate_industries(campaign: &Campaign, clients: &[&Client]) -> Vec<IndustryStat> {
    campaign
        .industries
        .iter()
        .map(|industry| aggregate_industry(industry, clients))
        .collect()
}

fn aggregate_industry(industry: &Industry, clients: &[&Client]) -> IndustryStat {
    let considered = clients.len();
    let mut products: BTreeMap<String, ProductStat> = industry
        .products
        .iter()
        .map(|product| {
            (
                product.clone(),
                ProductStat {
                    industry: industry.name.clone(),
                    product: product.clone(),
                    positivated_count: 0,
                    total_value: Money::ZERO,
                    clients_considered: considered,
                    missing_count: considered,
                    coverage_percentage: 0.0,
                },
            )
        })
        .collect();

    let mut positivated_clients = 0;
    for client in clients {
        let mut touched = false;
        for product in &industry.products {
            let Some(record) = client.product(&industry.name, product) else {
                continue;
            };
            if !record.positivated {
                continue;
            }

            touched = true;
            if let Some(stat) = products.get_mut(product) {
                stat.positivated_count += 1;
                stat.total_value = stat.total_value + record.counted_value();
            }
        }

        if touched {
            positivated_clients += 1;
        }
    }

    for stat in products.values_mut() {
        stat.missing_count = considered - stat.positivated_count;
        stat.coverage_percentage = ratio(stat.positivated_count, considered);
    }

    let total_value: Money = products.values().map(|stat| stat.total_value).sum();
    let positivated_product_count = products.values().map(|stat| stat.positivated_count).sum();

    IndustryStat {
        name: industry.name.clone(),
        goal: industry.goal,
        total_value,
        goal_percentage: total_value.percentage_of(industry.goal),
        positivated_client_count: positivated_clients,
        not_positivated_client_count: considered - positivated_clients,
        total_client_count: considered,
        positivated_product_count,
        potential_product_count: industry.products.len() * considered,
        products,
    }
}

/// `part / whole * 100`, or `0` when `whole` is zero.
pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }

    part as f64 * 100.0 / whole as f64
}
