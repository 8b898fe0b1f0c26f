use super::validation::ValidationError;
use crate::analytics::domain::Money;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Keys of a legacy industry map that carry metadata rather than products.
pub(crate) const RESERVED_INDUSTRY_KEYS: &[&str] = &["targetValue", "goal"];

/// Keys of a legacy client industry record that are not products.
const RESERVED_CLIENT_INDUSTRY_KEYS: &[&str] = &["industry_status", "industryStatus", "targetValue"];

/// Campaign and client documents as handed over by the storage collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshot {
    pub campaign: RawCampaign,
    #[serde(default)]
    pub clients: Vec<RawClient>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCampaign {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub industries: Option<RawIndustries>,
}

/// The industry layouts found in stored campaigns.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawIndustries {
    List(Vec<RawIndustry>),
    Keyed(Map<String, Value>),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIndustry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "targetValue")]
    pub goal: Option<RawMoney>,
    #[serde(default)]
    pub products: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    pub(crate) fn normalized(&self) -> Option<String> {
        let text = match self {
            RawId::Text(value) => value.trim().to_string(),
            RawId::Number(value) => value.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawMoney {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClient {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default, alias = "CLIENTE")]
    pub name: Option<String>,
    #[serde(default, alias = "CNPJ")]
    pub cnpj: Option<String>,
    #[serde(default, alias = "CIDADE")]
    pub city: Option<String>,
    #[serde(default, alias = "BAIRRO")]
    pub neighborhood: Option<String>,
    #[serde(default, alias = "ENDERECO")]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub industries: Option<BTreeMap<String, RawClientIndustry>>,
}

/// Client-side industry layouts: nested under `products`, or the legacy flat map.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawClientIndustry {
    Nested { products: BTreeMap<String, RawProduct> },
    Flat(Map<String, Value>),
    Empty(()),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawProduct {
    Flag(bool),
    Record(RawProductRecord),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProductRecord {
    #[serde(default, alias = "positivado")]
    pub positivated: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "valor")]
    pub value: Option<RawMoney>,
}

impl RawProductRecord {
    pub(crate) fn is_positivated(&self) -> bool {
        match (self.positivated, self.status.as_deref()) {
            (Some(flag), _) => flag,
            (None, Some(status)) => matches!(
                status.trim().to_lowercase().as_str(),
                "positivado" | "positivated"
            ),
            (None, None) => false,
        }
    }
}

/// Decoded product records of one client industry, keyed by trimmed product name.
pub(crate) type DecodedProducts = BTreeMap<String, (bool, Option<RawMoney>)>;

impl RawClientIndustry {
    pub(crate) fn decode(
        &self,
        client: &str,
        industry: &str,
    ) -> Result<DecodedProducts, ValidationError> {
        let mut decoded = DecodedProducts::new();

        match self {
            RawClientIndustry::Nested { products } => {
                for (name, product) in products {
                    decoded.insert(name.trim().to_string(), product.decode());
                }
            }
            RawClientIndustry::Flat(entries) => {
                if entries.contains_key("products") {
                    return Err(ValidationError::MalformedClientIndustry {
                        client: client.to_string(),
                        industry: industry.to_string(),
                    });
                }

                for (name, value) in entries {
                    if RESERVED_CLIENT_INDUSTRY_KEYS.contains(&name.as_str()) {
                        continue;
                    }

                    let product = serde_json::from_value::<RawProduct>(value.clone()).map_err(
                        |_| ValidationError::MalformedProduct {
                            client: client.to_string(),
                            industry: industry.to_string(),
                            product: name.clone(),
                        },
                    )?;
                    decoded.insert(name.trim().to_string(), product.decode());
                }
            }
            RawClientIndustry::Empty(()) => {}
        }

        Ok(decoded)
    }
}

impl RawProduct {
    fn decode(&self) -> (bool, Option<RawMoney>) {
        match self {
            RawProduct::Flag(flag) => (*flag, None),
            RawProduct::Record(record) => (record.is_positivated(), record.value.clone()),
        }
    }
}

pub(crate) fn parse_money(raw: Option<&RawMoney>, field: &str) -> Result<Money, ValidationError> {
    let invalid = |value: String| ValidationError::InvalidMoney {
        field: field.to_string(),
        value,
    };

    match raw {
        None => Ok(Money::ZERO),
        Some(RawMoney::Number(amount)) => {
            Money::from_decimal(*amount).ok_or_else(|| invalid(amount.to_string()))
        }
        Some(RawMoney::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(Money::ZERO);
            }

            let amount = if trimmed.contains('.') {
                trimmed.parse::<f64>()
            } else {
                trimmed.replace(',', ".").parse::<f64>()
            };

            amount
                .ok()
                .and_then(Money::from_decimal)
                .ok_or_else(|| invalid(trimmed.to_string()))
        }
    }
}

pub(crate) fn parse_money_value(value: Option<&Value>, field: &str) -> Result<Money, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(Money::ZERO),
        Some(Value::Number(number)) => {
            let amount = number.as_f64().unwrap_or(f64::NAN);
            parse_money(Some(&RawMoney::Number(amount)), field)
        }
        Some(Value::String(text)) => parse_money(Some(&RawMoney::Text(text.clone())), field),
        Some(other) => Err(ValidationError::InvalidMoney {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

pub(crate) fn parse_date(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(trimmed) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(dt.date_naive()));
    }

    Err(ValidationError::InvalidDate {
        field,
        value: trimmed.to_string(),
    })
}

pub(crate) fn trimmed(value: Option<&String>) -> String {
    value.map(|text| text.trim().to_string()).unwrap_or_default()
}
