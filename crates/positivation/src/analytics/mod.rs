//! Positivation analytics engine.
//!
//! Raw campaign and client documents pass through the [`normalizer`] once; every other
//! module works on the canonical [`Snapshot`] and is a pure function of it. The
//! [`repository`], [`service`] and [`router`] modules host the engine behind storage and
//! HTTP seams without leaking I/O into the computations.

pub mod aggregate;
pub mod domain;
pub mod filter;
pub mod geography;
pub mod normalizer;
pub mod ranking;
pub mod report;
pub mod repository;
pub mod router;
pub mod scorecard;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_industries, IndustryStat, ProductStat};
pub use domain::{
    Campaign, CampaignId, CampaignStatus, Client, ClientId, ClientIndustryRecord, Industry,
    Money, ProductRecord, Snapshot, SnapshotWarning,
};
pub use filter::{CityFilter, CompletionFilter, FilterSpec};
pub use geography::{cities, city_rollups, CityRollup};
pub use normalizer::{
    normalize, normalize_parts, RawCampaign, RawClient, RawSnapshot, SnapshotLoadError,
    SnapshotLoader, ValidationError,
};
pub use ranking::{top_clients, top_products, RankedClient, RankedProduct, RankingConfig};
pub use report::{CampaignOverview, CampaignSummaryView, PositivationReport, WarningView};
pub use repository::{RepositoryError, SnapshotRepository};
pub use router::analytics_router;
pub use scorecard::{build_scorecards, ClientScorecard, IndustryProgress};
pub use service::{AnalyticsServiceError, CampaignRankings, PositivationService};
