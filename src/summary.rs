use std::collections::HashSet;

use chrono::NaiveDate;

use crate::coerce::parse_date;
use crate::error::{AggregateError, Result};
use crate::models::{CampaignScoreRecord, CampaignSummary};

const CARD_DATE_FORMAT: &str = "%d %b";

/// One summary entry per distinct (name, start, end) triple, in first-seen order.
pub fn summarize_all(records: &[CampaignScoreRecord]) -> Result<Vec<CampaignSummary>> {
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut summaries = Vec::new();

    for record in records {
        let start = parse_date("start_date", &record.start_date)?;
        let end = parse_date("end_date", &record.end_date)?;
        let (start_label, end_label) = card_labels(start, end);

        if seen.insert((record.campaign_name.clone(), start_label, end_label)) {
            summaries.push(summarize(&record.campaign_name, start, end));
        }
    }

    tracing::debug!(records = records.len(), cards = summaries.len(), "built campaign cards");
    Ok(summaries)
}

/// Summary for one campaign. Both the name and the date range must exist.
pub fn summarize_single(
    campaign_id: &str,
    campaign_name: Option<String>,
    dates: Option<(String, String)>,
) -> Result<CampaignSummary> {
    let not_found = || AggregateError::NotFound {
        campaign_id: campaign_id.to_string(),
    };
    let name = campaign_name.filter(|n| !n.is_empty()).ok_or_else(not_found)?;
    let (start, end) = dates.ok_or_else(not_found)?;

    let start = parse_date("start_date", &start)?;
    let end = parse_date("end_date", &end)?;
    Ok(summarize(&name, start, end))
}

fn summarize(campaign_name: &str, start: NaiveDate, end: NaiveDate) -> CampaignSummary {
    let (start_label, end_label) = card_labels(start, end);
    CampaignSummary {
        campaign_name: campaign_name.to_string(),
        range: format!("{start_label} - {end_label}"),
        days: (end - start).num_days(),
    }
}

fn card_labels(start: NaiveDate, end: NaiveDate) -> (String, String) {
    (
        start.format(CARD_DATE_FORMAT).to_string(),
        end.format(CARD_DATE_FORMAT).to_string(),
    )
}
