use std::collections::HashMap;

use crate::models::{CampaignScoreRecord, CampaignTable};

#[derive(Debug, Default, Clone, Copy)]
struct ScoreTally {
    total: f64,
    count: u32,
}

impl ScoreTally {
    fn add(&mut self, score: Option<f64>) {
        if let Some(value) = score {
            self.total += value;
            self.count += 1;
        }
    }

    /// Integer part of the mean, or 0 when nothing was recorded.
    fn truncated_average(&self) -> i64 {
        if self.count == 0 {
            0
        } else {
            (self.total / f64::from(self.count)).trunc() as i64
        }
    }
}

#[derive(Debug)]
struct CampaignGroup {
    campaign_id: String,
    campaign_name: String,
    start_date: String,
    end_date: String,
    effectiveness: ScoreTally,
    media: ScoreTally,
    creative: ScoreTally,
}

/// Averages every campaign's scores across all of its rows, one column entry
/// per campaign id in first-seen order.
pub fn campaign_table(records: &[CampaignScoreRecord]) -> CampaignTable {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CampaignGroup> = Vec::new();

    for record in records {
        let slot = *index.entry(record.campaign_id.as_str()).or_insert_with(|| {
            groups.push(CampaignGroup {
                campaign_id: record.campaign_id.clone(),
                campaign_name: record.campaign_name.clone(),
                start_date: record.start_date.clone(),
                end_date: record.end_date.clone(),
                effectiveness: ScoreTally::default(),
                media: ScoreTally::default(),
                creative: ScoreTally::default(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.effectiveness.add(record.effectiveness);
        group.media.add(record.media);
        group.creative.add(record.creative);
    }

    tracing::debug!(records = records.len(), campaigns = groups.len(), "built campaign table");

    let mut table = CampaignTable::default();
    for group in groups {
        table.effectiveness.push(group.effectiveness.truncated_average());
        table.media.push(group.media.truncated_average());
        table.creative.push(group.creative.truncated_average());
        table.start_date.push(group.start_date);
        table.end_date.push(group.end_date);
        table.campaign_id.push(group.campaign_id);
        table.campaign_name.push(group.campaign_name);
    }

    table
}
