use crate::coerce::{add_count, parse_count};
use crate::error::Result;
use crate::models::{CampaignDailyRecord, InteractionTotals, PerformanceMetrics, ScopeSelector};

/// Grand totals of impressions, clicks and views for the scope.
pub fn rollup(records: &[CampaignDailyRecord], scope: &ScopeSelector) -> Result<PerformanceMetrics> {
    let mut totals = InteractionTotals::default();

    for record in records.iter().filter(|r| scope.includes(&r.campaign_id)) {
        let impressions = parse_count("impressions", &record.impressions)?;
        totals.impressions = add_count("impressions", totals.impressions, impressions)?;
        let clicks = parse_count("clicks", &record.clicks)?;
        totals.clicks = add_count("clicks", totals.clicks, clicks)?;
        let views = parse_count("views", &record.views)?;
        totals.views = add_count("views", totals.views, views)?;
    }

    Ok(PerformanceMetrics {
        current_metrics: totals,
    })
}
