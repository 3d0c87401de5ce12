use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of `tbl_daily_campaigns`. Metric cells are kept as raw text and
/// coerced by the builders.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignDailyRecord {
    pub campaign_id: String,
    pub campaign_name: String,
    pub date: String,
    pub impressions: String,
    pub clicks: String,
    pub views: String,
    pub cpm: String,
}

/// One row of `tbl_daily_scores`.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignScoreRecord {
    pub campaign_id: String,
    pub campaign_name: String,
    pub start_date: String,
    pub end_date: String,
    pub effectiveness: Option<f64>,
    pub media: Option<f64>,
    pub creative: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeSelector {
    All,
    Campaign(String),
}

impl ScopeSelector {
    pub fn includes(&self, campaign_id: &str) -> bool {
        match self {
            ScopeSelector::All => true,
            ScopeSelector::Campaign(id) => id == campaign_id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ScopeSelector::All => "all campaigns",
            ScopeSelector::Campaign(id) => id,
        }
    }
}

/// Inclusive date range applied to the trend facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignSummary {
    #[serde(rename = "campaignName")]
    pub campaign_name: String,
    pub range: String,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CampaignCard {
    All(Vec<CampaignSummary>),
    Single(CampaignSummary),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InteractionTotals {
    pub impressions: i64,
    pub clicks: i64,
    pub views: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    #[serde(rename = "currentMetrics")]
    pub current_metrics: InteractionTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImpressionsCpm {
    pub impression: BTreeMap<String, i64>,
    pub cpm: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeUnitCostTrend {
    #[serde(rename = "impressionsCpm")]
    pub impressions_cpm: ImpressionsCpm,
}

/// Column-oriented score table; every column has one entry per campaign id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CampaignTable {
    pub start_date: Vec<String>,
    pub end_date: Vec<String>,
    #[serde(rename = "adin_id")]
    pub campaign_id: Vec<String>,
    #[serde(rename = "campaign")]
    pub campaign_name: Vec<String>,
    pub effectiveness: Vec<i64>,
    pub media: Vec<i64>,
    pub creative: Vec<i64>,
}

impl CampaignTable {
    pub fn len(&self) -> usize {
        self.campaign_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaign_id.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    #[serde(rename = "campaignCard")]
    pub campaign_card: CampaignCard,
    #[serde(rename = "performanceMetrics")]
    pub performance_metrics: PerformanceMetrics,
    #[serde(rename = "volumeUnitCostTrend")]
    pub volume_unit_cost_trend: VolumeUnitCostTrend,
    #[serde(rename = "campaignTable")]
    pub campaign_table: CampaignTable,
}
