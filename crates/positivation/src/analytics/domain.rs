use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Identifier wrapper for campaigns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CampaignId(pub String);

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for clients. Ordering is lexical and breaks ranking ties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub String);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exact monetary amount held in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Converts a decimal amount of currency units, rounding to the nearest cent.
    /// Returns `None` for negative or non-finite input.
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents > u64::MAX as f64 {
            return None;
        }

        Some(Self(cents as u64))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// `self / whole * 100`, or `0` when `whole` is zero.
    pub fn percentage_of(self, whole: Money) -> f64 {
        if whole.is_zero() {
            return 0.0;
        }

        self.0 as f64 * 100.0 / whole.0 as f64
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Inactive,
    Completed,
}

impl CampaignStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "active" | "ativa" | "ativo" => Some(Self::Active),
            "inactive" | "inativa" | "inativo" => Some(Self::Inactive),
            "completed" | "concluida" | "concluída" | "finished" => Some(Self::Completed),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Completed => "Completed",
        }
    }
}

/// A named group of products sharing a sales goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Industry {
    pub name: String,
    pub goal: Money,
    pub products: Vec<String>,
}

impl Industry {
    /// Industries without products never enter completion or product denominators.
    pub fn has_products(&self) -> bool {
        !self.products.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub status: CampaignStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub industries: Vec<Industry>,
}

impl Campaign {
    pub fn industry(&self, name: &str) -> Option<&Industry> {
        self.industries.iter().find(|industry| industry.name == name)
    }

    /// Industries that carry at least one product, in campaign order.
    pub fn active_industries(&self) -> impl Iterator<Item = &Industry> + '_ {
        self.industries.iter().filter(|industry| industry.has_products())
    }

    pub fn total_products(&self) -> usize {
        self.industries
            .iter()
            .map(|industry| industry.products.len())
            .sum()
    }

    pub fn total_goal(&self) -> Money {
        self.industries.iter().map(|industry| industry.goal).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub positivated: bool,
    pub value: Money,
}

impl ProductRecord {
    /// Value that may enter any total: zero unless the product is positivated.
    pub fn counted_value(&self) -> Money {
        if self.positivated {
            self.value
        } else {
            Money::ZERO
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientIndustryRecord {
    pub products: BTreeMap<String, ProductRecord>,
}

impl ClientIndustryRecord {
    pub fn product(&self, name: &str) -> Option<&ProductRecord> {
        self.products.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub cnpj: String,
    pub city: String,
    pub neighborhood: String,
    pub address: String,
    pub notes: String,
    pub industries: BTreeMap<String, ClientIndustryRecord>,
}

impl Client {
    pub fn product(&self, industry: &str, product: &str) -> Option<&ProductRecord> {
        self.industries
            .get(industry)
            .and_then(|record| record.product(product))
    }

    pub fn is_positivated(&self, industry: &str, product: &str) -> bool {
        self.product(industry, product)
            .map(|record| record.positivated)
            .unwrap_or(false)
    }

    /// Whether every product of `industry` is positivated for this client.
    /// Industries without products are never complete.
    pub fn completes(&self, industry: &Industry) -> bool {
        industry.has_products()
            && industry
                .products
                .iter()
                .all(|product| self.is_positivated(&industry.name, product))
    }
}

/// Non-fatal conditions on an otherwise valid snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotWarning {
    NoClients,
    NoIndustries,
}

impl SnapshotWarning {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoClients => "campaign has no clients",
            Self::NoIndustries => "campaign has no industries",
        }
    }
}

/// Canonical campaign and client data handed to every computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub campaign: Campaign,
    pub clients: Vec<Client>,
    pub warnings: Vec<SnapshotWarning>,
}

impl Snapshot {
    /// Pairs a campaign with its clients and records the empty-input warnings.
    pub fn new(campaign: Campaign, clients: Vec<Client>) -> Self {
        let mut warnings = Vec::new();
        if clients.is_empty() {
            warnings.push(SnapshotWarning::NoClients);
        }
        if campaign.industries.is_empty() {
            warnings.push(SnapshotWarning::NoIndustries);
        }

        Self {
            campaign,
            clients,
            warnings,
        }
    }

    pub fn client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|client| &client.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_rounds_to_nearest_cent_and_rejects_negatives() {
        assert_eq!(Money::from_decimal(200.0), Some(Money::from_cents(20_000)));
        assert_eq!(Money::from_decimal(0.125), Some(Money::from_cents(13)));
        assert_eq!(Money::from_decimal(-0.01), None);
        assert_eq!(Money::from_decimal(f64::NAN), None);
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
    }

    #[test]
    fn money_percentage_never_divides_by_zero() {
        let sold = Money::from_cents(90_000);
        assert_eq!(sold.percentage_of(Money::from_cents(100_000)), 90.0);
        assert_eq!(sold.percentage_of(Money::ZERO), 0.0);
    }

    #[test]
    fn money_displays_two_decimals() {
        assert_eq!(Money::from_cents(120_005).to_string(), "1200.05");
    }

    #[test]
    fn status_accepts_portuguese_labels() {
        assert_eq!(CampaignStatus::parse("Ativa"), Some(CampaignStatus::Active));
        assert_eq!(
            CampaignStatus::parse(" concluida "),
            Some(CampaignStatus::Completed)
        );
        assert_eq!(CampaignStatus::parse("paused"), None);
    }

    #[test]
    fn empty_industry_is_never_complete() {
        let industry = Industry {
            name: "Vazia".to_string(),
            goal: Money::ZERO,
            products: Vec::new(),
        };
        let client = Client {
            id: ClientId("c1".to_string()),
            name: "Mercado".to_string(),
            cnpj: String::new(),
            city: String::new(),
            neighborhood: String::new(),
            address: String::new(),
            notes: String::new(),
            industries: BTreeMap::new(),
        };
        assert!(!client.completes(&industry));
    }
}
