use std::path::Path;

use crate::error::Result;
use crate::models::{CampaignDailyRecord, CampaignScoreRecord, ScopeSelector};

/// Fetch side of an aggregation. Each call returns a finished, in-memory batch.
pub trait RecordSource {
    async fn campaign_exists(&mut self, campaign_id: &str) -> Result<bool>;

    async fn daily_records(&mut self, scope: &ScopeSelector) -> Result<Vec<CampaignDailyRecord>>;

    async fn score_records(&mut self) -> Result<Vec<CampaignScoreRecord>>;

    async fn campaign_name(&mut self, campaign_id: &str) -> Result<Option<String>>;

    async fn campaign_dates(&mut self, campaign_id: &str) -> Result<Option<(String, String)>>;
}

/// Records held in memory, typically loaded from CSV exports of the two tables.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub daily: Vec<CampaignDailyRecord>,
    pub scores: Vec<CampaignScoreRecord>,
}

impl MemorySource {
    pub fn new(daily: Vec<CampaignDailyRecord>, scores: Vec<CampaignScoreRecord>) -> Self {
        Self { daily, scores }
    }

    pub fn from_csv(daily_path: &Path, scores_path: &Path) -> Result<Self> {
        let daily = read_csv(daily_path)?;
        let scores = read_csv(scores_path)?;
        tracing::debug!(
            daily = daily.len(),
            scores = scores.len(),
            "loaded campaign records from csv"
        );
        Ok(Self::new(daily, scores))
    }
}

fn read_csv<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();

    for result in reader.deserialize::<T>() {
        rows.push(result?);
    }

    Ok(rows)
}

impl RecordSource for MemorySource {
    async fn campaign_exists(&mut self, campaign_id: &str) -> Result<bool> {
        Ok(self.daily.iter().any(|r| r.campaign_id == campaign_id))
    }

    async fn daily_records(&mut self, scope: &ScopeSelector) -> Result<Vec<CampaignDailyRecord>> {
        Ok(self
            .daily
            .iter()
            .filter(|r| scope.includes(&r.campaign_id))
            .cloned()
            .collect())
    }

    async fn score_records(&mut self) -> Result<Vec<CampaignScoreRecord>> {
        Ok(self.scores.clone())
    }

    async fn campaign_name(&mut self, campaign_id: &str) -> Result<Option<String>> {
        Ok(self
            .daily
            .iter()
            .find(|r| r.campaign_id == campaign_id)
            .map(|r| r.campaign_name.clone()))
    }

    async fn campaign_dates(&mut self, campaign_id: &str) -> Result<Option<(String, String)>> {
        Ok(self
            .scores
            .iter()
            .find(|r| r.campaign_id == campaign_id)
            .map(|r| (r.start_date.clone(), r.end_date.clone())))
    }
}
