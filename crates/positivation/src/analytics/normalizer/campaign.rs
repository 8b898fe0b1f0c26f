use super::raw::{
    parse_date, parse_money, parse_money_value, trimmed, RawCampaign, RawIndustries, RawIndustry,
    RESERVED_INDUSTRY_KEYS,
};
use super::validation::ValidationError;
use crate::analytics::domain::{Campaign, CampaignId, CampaignStatus, Industry, Money};
use serde_json::{Map, Value};
use std::collections::HashSet;

pub(crate) fn normalize_campaign(raw: &RawCampaign) -> Result<Campaign, ValidationError> {
    let id = raw
        .id
        .as_ref()
        .and_then(|id| id.normalized())
        .ok_or(ValidationError::MissingCampaignId)?;

    let status = match raw.status.as_deref().map(str::trim) {
        None | Some("") => CampaignStatus::Active,
        Some(value) => CampaignStatus::parse(value)
            .ok_or_else(|| ValidationError::UnknownStatus(value.to_string()))?,
    };

    let start_date = parse_date(raw.start_date.as_deref(), "startDate")?;
    let end_date = parse_date(raw.end_date.as_deref(), "endDate")?;
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(ValidationError::InvertedPeriod { start, end });
        }
    }

    let industries = match &raw.industries {
        None => Vec::new(),
        Some(RawIndustries::List(list)) => list
            .iter()
            .enumerate()
            .map(|(index, industry)| from_listed(index, industry))
            .collect::<Result<Vec<_>, _>>()?,
        Some(RawIndustries::Keyed(map)) => map
            .iter()
            .enumerate()
            .map(|(index, (name, body))| from_keyed(index, name, body))
            .collect::<Result<Vec<_>, _>>()?,
    };

    let mut seen = HashSet::new();
    for industry in &industries {
        if !seen.insert(industry.name.as_str()) {
            return Err(ValidationError::DuplicateIndustry(industry.name.clone()));
        }
    }

    Ok(Campaign {
        id: CampaignId(id),
        name: trimmed(raw.name.as_ref()),
        status,
        start_date,
        end_date,
        industries,
    })
}

fn from_listed(index: usize, raw: &RawIndustry) -> Result<Industry, ValidationError> {
    let name = industry_name(index, raw.name.as_deref().unwrap_or_default())?;
    let goal = parse_money(raw.goal.as_ref(), &goal_field(&name))?;
    let products = raw.products.clone().unwrap_or_default();
    build_industry(name, goal, products)
}

fn from_keyed(index: usize, name: &str, body: &Value) -> Result<Industry, ValidationError> {
    let name = industry_name(index, name)?;
    let malformed = || ValidationError::MalformedIndustry {
        industry: name.clone(),
    };

    let (goal, products) = match body {
        Value::Null => (Money::ZERO, Vec::new()),
        Value::Array(items) => (Money::ZERO, product_names(items).ok_or_else(malformed)?),
        Value::Object(entries) => {
            let goal = parse_money_value(
                entries.get("targetValue").or_else(|| entries.get("goal")),
                &goal_field(&name),
            )?;
            let products = match entries.get("products") {
                Some(Value::Array(items)) => product_names(items).ok_or_else(malformed)?,
                Some(_) => return Err(malformed()),
                None => keyed_product_names(entries),
            };
            (goal, products)
        }
        _ => return Err(malformed()),
    };

    build_industry(name, goal, products)
}

fn build_industry(
    name: String,
    goal: Money,
    products: Vec<String>,
) -> Result<Industry, ValidationError> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(products.len());

    for product in products {
        let product = product.trim().to_string();
        if product.is_empty() {
            return Err(ValidationError::BlankProductName { industry: name });
        }
        if !seen.insert(product.clone()) {
            return Err(ValidationError::DuplicateProduct {
                industry: name,
                product,
            });
        }
        normalized.push(product);
    }

    Ok(Industry {
        name,
        goal,
        products: normalized,
    })
}

fn industry_name(index: usize, raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankIndustryName { index });
    }
    Ok(name.to_string())
}

fn goal_field(industry: &str) -> String {
    format!("goal of industry '{industry}'")
}

fn product_names(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

fn keyed_product_names(entries: &Map<String, Value>) -> Vec<String> {
    entries
        .keys()
        .filter(|key| !RESERVED_INDUSTRY_KEYS.contains(&key.as_str()))
        .cloned()
        .collect()
}
