use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::coerce::{add_count, parse_count, parse_date, parse_decimal, round_cents, DATE_FORMAT};
use crate::error::Result;
use crate::models::{
    CampaignDailyRecord, DateWindow, ImpressionsCpm, ScopeSelector, VolumeUnitCostTrend,
};

/// Daily impressions and CPM inside `window`, keyed and ordered by date.
///
/// Rows sharing a date are summed across campaigns in the all-campaign scope;
/// within a single campaign the last row for a date replaces earlier ones.
pub fn volume_unit_cost_trend(
    records: &[CampaignDailyRecord],
    scope: &ScopeSelector,
    window: &DateWindow,
) -> Result<VolumeUnitCostTrend> {
    let mut by_date: BTreeMap<NaiveDate, (i64, f64)> = BTreeMap::new();

    for record in records.iter().filter(|r| scope.includes(&r.campaign_id)) {
        let date = parse_date("date", &record.date)?;
        if !window.contains(date) {
            continue;
        }

        let impressions = parse_count("impressions", &record.impressions)?;
        let cpm = round_cents(parse_decimal("cpm", &record.cpm)?);

        match scope {
            ScopeSelector::All => {
                let entry = by_date.entry(date).or_insert((0, 0.0));
                entry.0 = add_count("impressions", entry.0, impressions)?;
                entry.1 += cpm;
            }
            ScopeSelector::Campaign(_) => {
                by_date.insert(date, (impressions, cpm));
            }
        }
    }

    tracing::debug!(
        records = records.len(),
        dates = by_date.len(),
        start = %window.start,
        end = %window.end,
        "built volume unit cost trend"
    );

    let mut series = ImpressionsCpm::default();
    for (date, (impressions, cpm)) in by_date {
        let key = date.format(DATE_FORMAT).to_string();
        series.impression.insert(key.clone(), impressions);
        series.cpm.insert(key, cpm);
    }

    Ok(VolumeUnitCostTrend {
        impressions_cpm: series,
    })
}
