use crate::analytics::domain::{Campaign, Client, Industry};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// City selection; `"all"` on the wire is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CityFilter {
    #[default]
    All,
    Only(String),
}

impl CityFilter {
    pub fn only(city: impl Into<String>) -> Self {
        Self::from_raw(&city.into())
    }

    fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "all" {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    fn matches(&self, client: &Client) -> bool {
        match self {
            CityFilter::All => true,
            CityFilter::Only(city) => client.city == *city,
        }
    }
}

impl Serialize for CityFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CityFilter::All => serializer.serialize_str("all"),
            CityFilter::Only(city) => serializer.serialize_str(city),
        }
    }
}

impl<'de> Deserialize<'de> for CityFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|value| Self::from_raw(&value)).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionFilter {
    #[default]
    All,
    /// Every selected industry is complete for the client.
    Complete,
    /// At least one selected industry is incomplete for the client.
    Incomplete,
}

/// Composable predicate over the client set. Every field defaults to the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub city: CityFilter,
    /// Selected industry names; empty selects every industry that has products.
    pub industries: BTreeSet<String>,
    pub completion: CompletionFilter,
    pub search: String,
}

impl FilterSpec {
    pub fn is_identity(&self) -> bool {
        self.city == CityFilter::All
            && self.completion == CompletionFilter::All
            && self.search.trim().is_empty()
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = CityFilter::only(city);
        self
    }

    pub fn with_industries<I, S>(mut self, industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industries = industries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_completion(mut self, completion: CompletionFilter) -> Self {
        self.completion = completion;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Stable filter: keeps the input's relative order.
    pub fn apply<'a>(&self, campaign: &Campaign, clients: &'a [Client]) -> Vec<&'a Client> {
        let compiled = CompiledFilter::new(self, campaign);
        clients
            .iter()
            .filter(|client| compiled.matches(client))
            .collect()
    }

    /// Narrows an already filtered subset; lets independent predicates compose in any order.
    pub fn refine<'a>(&self, campaign: &Campaign, clients: &[&'a Client]) -> Vec<&'a Client> {
        let compiled = CompiledFilter::new(self, campaign);
        clients
            .iter()
            .copied()
            .filter(|client| compiled.matches(client))
            .collect()
    }

    pub fn matches(&self, campaign: &Campaign, client: &Client) -> bool {
        CompiledFilter::new(self, campaign).matches(client)
    }
}

/// A selected industry resolved against the campaign; `None` when the campaign does not
/// define it, which makes it incomplete for every client.
type Selection<'c> = Vec<Option<&'c Industry>>;

struct CompiledFilter<'s, 'c> {
    spec: &'s FilterSpec,
    selection: Selection<'c>,
    needle: Option<String>,
}

impl<'s, 'c> CompiledFilter<'s, 'c> {
    fn new(spec: &'s FilterSpec, campaign: &'c Campaign) -> Self {
        let selection = if spec.industries.is_empty() {
            campaign.active_industries().map(Some).collect()
        } else {
            spec.industries
                .iter()
                .map(|name| campaign.industry(name.trim()))
                .collect()
        };

        let needle = Some(spec.search.trim())
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase);

        Self {
            spec,
            selection,
            needle,
        }
    }

    fn matches(&self, client: &Client) -> bool {
        self.spec.city.matches(client)
            && self.matches_search(client)
            && self.matches_completion(client)
    }

    fn matches_search(&self, client: &Client) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => client.name.to_lowercase().contains(needle.as_str()),
        }
    }

    fn matches_completion(&self, client: &Client) -> bool {
        let complete = |industry: &Option<&Industry>| {
            industry.map(|industry| client.completes(industry)).unwrap_or(false)
        };

        // Nothing to evaluate completion against: the status filter is inert.
        if self.selection.is_empty() {
            return true;
        }

        match self.spec.completion {
            CompletionFilter::All => true,
            CompletionFilter::Complete => self.selection.iter().all(complete),
            CompletionFilter::Incomplete => !self.selection.iter().all(complete),
        }
    }
}
