use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::analytics::domain::{
    Campaign, CampaignId, CampaignStatus, Client, ClientId, ClientIndustryRecord, Industry, Money,
    ProductRecord, Snapshot,
};
use crate::analytics::ranking::RankingConfig;
use crate::analytics::repository::{RepositoryError, SnapshotRepository};
use crate::analytics::service::PositivationService;

pub(super) fn reais(amount: u64) -> Money {
    Money::from_cents(amount * 100)
}

pub(super) fn industry(name: &str, goal: u64, products: &[&str]) -> Industry {
    Industry {
        name: name.to_string(),
        goal: reais(goal),
        products: products.iter().map(|product| product.to_string()).collect(),
    }
}

pub(super) fn campaign(industries: Vec<Industry>) -> Campaign {
    Campaign {
        id: CampaignId("camp-verao".to_string()),
        name: "Verão 2025".to_string(),
        status: CampaignStatus::Active,
        start_date: None,
        end_date: None,
        industries,
    }
}

/// Client with a record for every campaign product; `sold` lists the positivated ones as
/// `(industry, product, value in reais)`.
pub(super) fn client(
    campaign: &Campaign,
    id: &str,
    name: &str,
    city: &str,
    sold: &[(&str, &str, u64)],
) -> Client {
    let mut industries = BTreeMap::new();
    for industry in &campaign.industries {
        let mut record = ClientIndustryRecord::default();
        for product in &industry.products {
            let sale = sold.iter().find(|(name, item, _)| {
                *name == industry.name.as_str() && *item == product.as_str()
            });
            let entry = match sale {
                Some((_, _, value)) => ProductRecord {
                    positivated: true,
                    value: reais(*value),
                },
                None => ProductRecord::default(),
            };
            record.products.insert(product.clone(), entry);
        }
        industries.insert(industry.name.clone(), record);
    }

    Client {
        id: ClientId(id.to_string()),
        name: name.to_string(),
        cnpj: String::new(),
        city: city.to_string(),
        neighborhood: String::new(),
        address: String::new(),
        notes: String::new(),
        industries,
    }
}

/// Sets a value on a product without flagging it positivated.
pub(super) fn with_unflagged_value(
    mut client: Client,
    industry: &str,
    product: &str,
    value: u64,
) -> Client {
    let record = client
        .industries
        .get_mut(industry)
        .and_then(|record| record.products.get_mut(product))
        .expect("product exists on client");
    record.positivated = false;
    record.value = reais(value);
    client
}

pub(super) fn bebidas_campaign() -> Campaign {
    campaign(vec![industry("Bebidas", 1000, &["Skol", "Brahma"])])
}

/// Client A sells Skol only; client B sells both products.
pub(super) fn bebidas_snapshot() -> Snapshot {
    let campaign = bebidas_campaign();
    let clients = vec![
        client(&campaign, "A", "Bar A", "Campinas", &[("Bebidas", "Skol", 200)]),
        client(
            &campaign,
            "B",
            "Bar B",
            "Sorocaba",
            &[("Bebidas", "Skol", 300), ("Bebidas", "Brahma", 400)],
        ),
    ];
    Snapshot::new(campaign, clients)
}

pub(super) fn mixed_campaign() -> Campaign {
    campaign(vec![
        industry("Bebidas", 1000, &["Skol", "Brahma"]),
        industry("Limpeza", 0, &["Omo", "Ype"]),
        industry("Vazia", 500, &[]),
    ])
}

/// Four clients:
/// - `c1` completes Bebidas and half of Limpeza (R$ 300).
/// - `c2` completes Limpeza only (R$ 150).
/// - `c3` sells nothing but carries an unflagged Skol value.
/// - `c4` has no city and completes everything (R$ 520).
pub(super) fn mixed_snapshot() -> Snapshot {
    let campaign = mixed_campaign();
    let clients = vec![
        client(
            &campaign,
            "c1",
            "Bar do Zé",
            "Campinas",
            &[
                ("Bebidas", "Skol", 150),
                ("Bebidas", "Brahma", 100),
                ("Limpeza", "Omo", 50),
            ],
        ),
        client(
            &campaign,
            "c2",
            "Mercado Central",
            "Campinas",
            &[("Limpeza", "Omo", 80), ("Limpeza", "Ype", 70)],
        ),
        with_unflagged_value(
            client(&campaign, "c3", "Padaria Sol", "São Paulo", &[]),
            "Bebidas",
            "Skol",
            999,
        ),
        client(
            &campaign,
            "c4",
            "Empório Lua",
            "",
            &[
                ("Bebidas", "Skol", 300),
                ("Bebidas", "Brahma", 200),
                ("Limpeza", "Omo", 10),
                ("Limpeza", "Ype", 10),
            ],
        ),
    ];
    Snapshot::new(campaign, clients)
}

pub(super) fn ids(clients: &[&Client]) -> Vec<String> {
    clients.iter().map(|client| client.id.0.clone()).collect()
}

pub(super) fn raw_snapshot_json() -> Value {
    json!({
        "campaign": {
            "id": "camp-verao",
            "name": "Verão 2025",
            "status": "ativa",
            "industries": [
                { "name": "Bebidas", "goal": 1000, "products": ["Skol", "Brahma"] }
            ]
        },
        "clients": [
            {
                "id": "A",
                "name": "Bar A",
                "city": "Campinas",
                "industries": {
                    "Bebidas": { "products": { "Skol": { "positivated": true, "value": 200 } } }
                }
            },
            {
                "id": "B",
                "name": "Bar B",
                "city": "Sorocaba",
                "industries": {
                    "Bebidas": {
                        "products": {
                            "Skol": { "positivated": true, "value": 300 },
                            "Brahma": { "positivated": true, "value": 400 }
                        }
                    }
                }
            }
        ]
    })
}

pub(super) fn build_service() -> (PositivationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = PositivationService::new(repository.clone(), RankingConfig::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) snapshots: Arc<Mutex<HashMap<CampaignId, Snapshot>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.snapshots.lock().expect("repository mutex poisoned").len()
    }
}

impl SnapshotRepository for MemoryRepository {
    fn store(&self, snapshot: Snapshot) -> Result<(), RepositoryError> {
        let mut guard = self.snapshots.lock().expect("repository mutex poisoned");
        guard.insert(snapshot.campaign.id.clone(), snapshot);
        Ok(())
    }

    fn campaign(&self, id: &CampaignId) -> Result<Option<Campaign>, RepositoryError> {
        let guard = self.snapshots.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).map(|snapshot| snapshot.campaign.clone()))
    }

    fn clients(&self, id: &CampaignId) -> Result<Vec<Client>, RepositoryError> {
        let guard = self.snapshots.lock().expect("repository mutex poisoned");
        guard
            .get(id)
            .map(|snapshot| snapshot.clients.clone())
            .ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl SnapshotRepository for UnavailableRepository {
    fn store(&self, _snapshot: Snapshot) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn campaign(&self, _id: &CampaignId) -> Result<Option<Campaign>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn clients(&self, _id: &CampaignId) -> Result<Vec<Client>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
