use crate::analytics::domain::{Campaign, CampaignId, CampaignStatus, SnapshotWarning};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummaryView {
    pub id: CampaignId,
    pub name: String,
    pub status: CampaignStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub industry_count: usize,
    pub product_count: usize,
}

impl CampaignSummaryView {
    pub fn from_campaign(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id.clone(),
            name: campaign.name.clone(),
            status: campaign.status,
            status_label: campaign.status.label(),
            start_date: campaign.start_date,
            end_date: campaign.end_date,
            industry_count: campaign.industries.len(),
            product_count: campaign.total_products(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarningView {
    pub code: SnapshotWarning,
    pub message: &'static str,
}

impl From<SnapshotWarning> for WarningView {
    fn from(warning: SnapshotWarning) -> Self {
        Self {
            code: warning,
            message: warning.label(),
        }
    }
}
