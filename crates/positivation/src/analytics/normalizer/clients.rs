use super::raw::{parse_money, trimmed, DecodedProducts, RawClient};
use super::validation::ValidationError;
use crate::analytics::domain::{Campaign, Client, ClientId, ClientIndustryRecord, ProductRecord};
use std::collections::{BTreeMap, HashSet};

pub(crate) fn normalize_clients(
    campaign: &Campaign,
    raws: &[RawClient],
) -> Result<Vec<Client>, ValidationError> {
    let mut seen = HashSet::new();
    let mut clients = Vec::with_capacity(raws.len());

    for (index, raw) in raws.iter().enumerate() {
        let client = normalize_client(campaign, index, raw)?;
        if !seen.insert(client.id.clone()) {
            return Err(ValidationError::DuplicateClientId(client.id.0));
        }
        clients.push(client);
    }

    Ok(clients)
}

fn normalize_client(
    campaign: &Campaign,
    index: usize,
    raw: &RawClient,
) -> Result<Client, ValidationError> {
    let id = raw
        .id
        .as_ref()
        .and_then(|id| id.normalized())
        .ok_or(ValidationError::MissingClientId { index })?;

    let mut decoded: BTreeMap<String, BTreeMap<String, ProductRecord>> = BTreeMap::new();
    for (industry, record) in raw.industries.iter().flatten() {
        let industry = industry.trim();
        let products = record.decode(&id, industry)?;
        let entry = decoded.entry(industry.to_string()).or_default();
        for (product, record) in resolve_values(&id, industry, products)? {
            entry.insert(product, record);
        }
    }

    Ok(Client {
        industries: sync_with_campaign(campaign, &decoded),
        id: ClientId(id),
        name: trimmed(raw.name.as_ref()),
        cnpj: trimmed(raw.cnpj.as_ref()),
        city: trimmed(raw.city.as_ref()),
        neighborhood: trimmed(raw.neighborhood.as_ref()),
        address: trimmed(raw.address.as_ref()),
        notes: trimmed(raw.notes.as_ref()),
    })
}

fn resolve_values(
    client: &str,
    industry: &str,
    products: DecodedProducts,
) -> Result<Vec<(String, ProductRecord)>, ValidationError> {
    products
        .into_iter()
        .map(|(product, (positivated, value))| {
            let field = format!("value of '{product}' in '{industry}' for client '{client}'");
            let value = parse_money(value.as_ref(), &field)?;
            Ok((product, ProductRecord { positivated, value }))
        })
        .collect()
}

/// Aligns a client's records with the campaign definition: every campaign product gets a
/// record (defaulting to not positivated, zero value) and anything the campaign no longer
/// defines is dropped.
pub(crate) fn sync_with_campaign(
    campaign: &Campaign,
    decoded: &BTreeMap<String, BTreeMap<String, ProductRecord>>,
) -> BTreeMap<String, ClientIndustryRecord> {
    campaign
        .industries
        .iter()
        .map(|industry| {
            let existing = decoded.get(&industry.name);
            let products = industry
                .products
                .iter()
                .map(|product| {
                    let record = existing
                        .and_then(|records| records.get(product))
                        .copied()
                        .unwrap_or_default();
                    (product.clone(), record)
                })
                .collect();
            (industry.name.clone(), ClientIndustryRecord { products })
        })
        .collect()
}
