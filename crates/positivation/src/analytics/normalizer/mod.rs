mod campaign;
mod clients;
mod raw;
mod validation;

use crate::analytics::domain::Snapshot;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub use raw::{
    RawCampaign, RawClient, RawClientIndustry, RawId, RawIndustries, RawIndustry, RawMoney,
    RawProduct, RawProductRecord, RawSnapshot,
};
pub use validation::ValidationError;

/// Validates raw campaign and client documents and resolves them into the canonical model.
pub fn normalize(raw: &RawSnapshot) -> Result<Snapshot, ValidationError> {
    normalize_parts(&raw.campaign, &raw.clients)
}

pub fn normalize_parts(
    raw_campaign: &RawCampaign,
    raw_clients: &[RawClient],
) -> Result<Snapshot, ValidationError> {
    let campaign = campaign::normalize_campaign(raw_campaign)?;
    let clients = clients::normalize_clients(&campaign, raw_clients)?;

    let snapshot = Snapshot::new(campaign, clients);
    for warning in &snapshot.warnings {
        warn!(campaign = %snapshot.campaign.id, "{}", warning.label());
    }

    debug!(
        campaign = %snapshot.campaign.id,
        industries = snapshot.campaign.industries.len(),
        clients = snapshot.clients.len(),
        "snapshot normalized"
    );

    Ok(snapshot)
}

#[derive(Debug)]
pub enum SnapshotLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Validation(ValidationError),
}

impl std::fmt::Display for SnapshotLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotLoadError::Io(err) => write!(f, "failed to read snapshot: {}", err),
            SnapshotLoadError::Json(err) => write!(f, "invalid snapshot document: {}", err),
            SnapshotLoadError::Validation(err) => write!(f, "snapshot rejected: {}", err),
        }
    }
}

impl std::error::Error for SnapshotLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotLoadError::Io(err) => Some(err),
            SnapshotLoadError::Json(err) => Some(err),
            SnapshotLoadError::Validation(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SnapshotLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SnapshotLoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<ValidationError> for SnapshotLoadError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// Loads `{ "campaign": ..., "clients": [...] }` JSON documents.
pub struct SnapshotLoader;

impl SnapshotLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Snapshot, SnapshotLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Snapshot, SnapshotLoadError> {
        let raw: RawSnapshot = serde_json::from_reader(reader)?;
        Ok(normalize(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::domain::{CampaignStatus, ClientId, Money, SnapshotWarning};
    use serde_json::json;
    use std::io::Cursor;

    fn snapshot(value: serde_json::Value) -> Result<Snapshot, ValidationError> {
        let raw: RawSnapshot = serde_json::from_value(value).expect("raw snapshot decodes");
        normalize(&raw)
    }

    #[test]
    fn canonical_campaign_and_clients_normalize() {
        let snapshot = snapshot(json!({
            "campaign": {
                "id": "camp-1",
                "name": " Verão ",
                "status": "active",
                "startDate": "2025-01-01",
                "endDate": "2025-03-31",
                "industries": [
                    { "name": "Bebidas", "goal": 1000, "products": ["Skol", "Brahma"] }
                ]
            },
            "clients": [{
                "id": "c1",
                "name": "Bar do Zé",
                "city": " Campinas ",
                "industries": {
                    "Bebidas": { "products": { "Skol": { "positivated": true, "value": 200 } } }
                }
            }]
        }))
        .expect("valid snapshot");

        assert_eq!(snapshot.campaign.name, "Verão");
        assert_eq!(snapshot.campaign.status, CampaignStatus::Active);
        assert_eq!(snapshot.campaign.industries[0].goal, Money::from_cents(100_000));
        let client = &snapshot.clients[0];
        assert_eq!(client.city, "Campinas");
        assert!(client.is_positivated("Bebidas", "Skol"));
        let brahma = client.product("Bebidas", "Brahma").expect("synced product");
        assert!(!brahma.positivated);
        assert_eq!(brahma.value, Money::ZERO);
        assert!(snapshot.warnings.is_empty());
    }

    #[test]
    fn legacy_keyed_industries_skip_target_value() {
        let snapshot = snapshot(json!({
            "campaign": {
                "id": "legacy",
                "industries": {
                    "Limpeza": { "Omo": {}, "Ypê": {}, "targetValue": 500 },
                    "Mercearia": ["Arroz", "Feijão"]
                }
            },
            "clients": []
        }))
        .expect("legacy campaign decodes");

        let industries = &snapshot.campaign.industries;
        assert_eq!(industries[0].name, "Limpeza");
        assert_eq!(industries[0].products, vec!["Omo", "Ypê"]);
        assert_eq!(industries[0].goal, Money::from_cents(50_000));
        assert_eq!(industries[1].products, vec!["Arroz", "Feijão"]);
        assert_eq!(snapshot.warnings, vec![SnapshotWarning::NoClients]);
    }

    #[test]
    fn keyed_canonical_bodies_keep_goal_and_product_order() {
        let snapshot = snapshot(json!({
            "campaign": {
                "id": "keyed",
                "industries": {
                    "Bebidas": { "goal": 750, "products": ["Skol", "Brahma", "Antarctica"] },
                    "Limpeza": { "products": [] }
                }
            },
            "clients": []
        }))
        .expect("keyed canonical campaign decodes");

        let industries = &snapshot.campaign.industries;
        assert_eq!(industries.len(), 2);
        assert_eq!(industries[0].name, "Bebidas");
        assert_eq!(industries[0].goal, Money::from_cents(75_000));
        assert_eq!(industries[0].products, vec!["Skol", "Brahma", "Antarctica"]);
        assert_eq!(industries[1].name, "Limpeza");
        assert_eq!(industries[1].goal, Money::ZERO);
        assert!(industries[1].products.is_empty());
    }

    #[test]
    fn keyed_products_must_be_a_list() {
        let error = snapshot(json!({
            "campaign": {
                "id": "keyed",
                "industries": {
                    "Bebidas": { "goal": 10, "products": { "Skol": {}, "Brahma": {} } }
                }
            },
            "clients": []
        }))
        .expect_err("object-valued products rejected");

        assert_eq!(
            error,
            ValidationError::MalformedIndustry {
                industry: "Bebidas".to_string()
            }
        );
    }

    #[test]
    fn legacy_client_fields_and_flat_products_decode() {
        let snapshot = snapshot(json!({
            "campaign": {
                "id": 7,
                "industries": [{ "name": "Bebidas", "products": ["Skol"] }]
            },
            "clients": [{
                "id": 42,
                "CLIENTE": "Empório",
                "CIDADE": "Santos",
                "CNPJ": "12.345.678/0001-90",
                "industries": {
                    "Bebidas": { "Skol": { "positivado": true, "valor": "150,50" } }
                }
            }]
        }))
        .expect("legacy client decodes");

        let client = &snapshot.clients[0];
        assert_eq!(client.id, ClientId("42".to_string()));
        assert_eq!(client.name, "Empório");
        assert_eq!(client.city, "Santos");
        let skol = client.product("Bebidas", "Skol").expect("skol present");
        assert!(skol.positivated);
        assert_eq!(skol.value, Money::from_cents(15_050));
    }

    #[test]
    fn status_strings_resolve_positivation() {
        let snapshot = snapshot(json!({
            "campaign": { "id": "c", "industries": [{ "name": "A", "products": ["p", "q"] }] },
            "clients": [{
                "id": "x",
                "industries": { "A": { "products": {
                    "p": { "status": "Positivado", "value": "10" },
                    "q": { "status": "", "value": 99 }
                } } }
            }]
        }))
        .expect("status records decode");

        let client = &snapshot.clients[0];
        assert!(client.is_positivated("A", "p"));
        let q = client.product("A", "q").expect("q present");
        assert!(!q.positivated);
        assert_eq!(q.counted_value(), Money::ZERO);
    }

    #[test]
    fn sync_drops_products_and_industries_missing_from_campaign() {
        let snapshot = snapshot(json!({
            "campaign": { "id": "c", "industries": [{ "name": "A", "products": ["kept"] }] },
            "clients": [{
                "id": "x",
                "industries": {
                    "A": { "products": { "kept": true, "removed": true } },
                    "Gone": { "products": { "old": true } }
                }
            }]
        }))
        .expect("snapshot decodes");

        let client = &snapshot.clients[0];
        assert_eq!(client.industries.len(), 1);
        let products = &client.industries["A"].products;
        assert_eq!(products.keys().collect::<Vec<_>>(), vec!["kept"]);
    }

    #[test]
    fn missing_client_id_is_rejected() {
        let error = snapshot(json!({
            "campaign": { "id": "c" },
            "clients": [{ "id": "a" }, { "name": "no id" }]
        }))
        .expect_err("missing id rejected");

        assert_eq!(error, ValidationError::MissingClientId { index: 1 });
    }

    #[test]
    fn duplicate_products_and_negative_goals_are_rejected() {
        let duplicate = snapshot(json!({
            "campaign": { "id": "c", "industries": [{ "name": "A", "products": ["p", " p "] }] }
        }))
        .expect_err("duplicate product rejected");
        assert_eq!(
            duplicate,
            ValidationError::DuplicateProduct {
                industry: "A".to_string(),
                product: "p".to_string()
            }
        );

        let negative = snapshot(json!({
            "campaign": { "id": "c", "industries": [{ "name": "A", "goal": -5, "products": [] }] }
        }))
        .expect_err("negative goal rejected");
        assert!(matches!(negative, ValidationError::InvalidMoney { .. }));
    }

    #[test]
    fn negative_product_values_are_rejected() {
        let error = snapshot(json!({
            "campaign": { "id": "c", "industries": [{ "name": "A", "products": ["p"] }] },
            "clients": [{ "id": "x", "industries": { "A": { "products": {
                "p": { "positivated": true, "value": -1 }
            } } } }]
        }))
        .expect_err("negative value rejected");

        assert!(matches!(error, ValidationError::InvalidMoney { .. }));
    }

    #[test]
    fn empty_campaign_reports_warnings_instead_of_failing() {
        let snapshot = snapshot(json!({ "campaign": { "id": "fresh" } })).expect("empty is fine");
        assert_eq!(
            snapshot.warnings,
            vec![SnapshotWarning::NoClients, SnapshotWarning::NoIndustries]
        );
    }

    #[test]
    fn inverted_period_and_bad_status_are_rejected() {
        let inverted = snapshot(json!({
            "campaign": { "id": "c", "startDate": "2025-05-01", "endDate": "2025-04-01" }
        }))
        .expect_err("inverted period rejected");
        assert!(matches!(inverted, ValidationError::InvertedPeriod { .. }));

        let status = snapshot(json!({ "campaign": { "id": "c", "status": "paused" } }))
            .expect_err("unknown status rejected");
        assert_eq!(status, ValidationError::UnknownStatus("paused".to_string()));
    }

    #[test]
    fn loader_surfaces_json_errors() {
        let error = SnapshotLoader::from_reader(Cursor::new("{ not json"))
            .expect_err("invalid json rejected");
        match error {
            SnapshotLoadError::Json(_) => {}
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[test]
    fn loader_from_path_propagates_io_errors() {
        let error = SnapshotLoader::from_path("./does-not-exist.json").expect_err("io error");
        match error {
            SnapshotLoadError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
