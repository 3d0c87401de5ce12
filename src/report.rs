use std::fmt::Write;

use crate::models::{AggregationResult, CampaignCard, DateWindow, ScopeSelector};

pub fn build_report(scope: &ScopeSelector, window: &DateWindow, result: &AggregationResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Campaign Performance Report");
    let _ = writeln!(
        output,
        "Generated for {} (trend from {} to {})",
        scope.label(),
        window.start,
        window.end
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Campaigns");

    let cards = match &result.campaign_card {
        CampaignCard::All(cards) => cards.as_slice(),
        CampaignCard::Single(card) => std::slice::from_ref(card),
    };

    if cards.is_empty() {
        let _ = writeln!(output, "No campaigns recorded.");
    } else {
        for card in cards {
            let _ = writeln!(
                output,
                "- {} ({}, {} days)",
                card.campaign_name, card.range, card.days
            );
        }
    }

    let totals = &result.performance_metrics.current_metrics;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Performance");
    let _ = writeln!(output, "- Impressions: {}", totals.impressions);
    let _ = writeln!(output, "- Clicks: {}", totals.clicks);
    let _ = writeln!(output, "- Views: {}", totals.views);

    let series = &result.volume_unit_cost_trend.impressions_cpm;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Impressions and CPM by Day");

    if series.impression.is_empty() {
        let _ = writeln!(output, "No activity in this window.");
    } else {
        let _ = writeln!(output, "| Date | Impressions | CPM |");
        let _ = writeln!(output, "|------|-------------|-----|");
        for (date, impressions) in &series.impression {
            let cpm = series.cpm.get(date).copied().unwrap_or_default();
            let _ = writeln!(output, "| {date} | {impressions} | {cpm:.2} |");
        }
    }

    let table = &result.campaign_table;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Campaign Scores");

    if table.is_empty() {
        let _ = writeln!(output, "No scores recorded.");
    } else {
        let _ = writeln!(
            output,
            "| Campaign | ID | Start | End | Effectiveness | Media | Creative |"
        );
        let _ = writeln!(
            output,
            "|----------|----|-------|-----|---------------|-------|----------|"
        );
        for row in 0..table.len() {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} | {} |",
                table.campaign_name[row],
                table.campaign_id[row],
                table.start_date[row],
                table.end_date[row],
                table.effectiveness[row],
                table.media[row],
                table.creative[row]
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::models::{
        CampaignSummary, CampaignTable, ImpressionsCpm, InteractionTotals, PerformanceMetrics,
        VolumeUnitCostTrend,
    };

    fn window() -> DateWindow {
        DateWindow {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        }
    }

    fn sample_result() -> AggregationResult {
        AggregationResult {
            campaign_card: CampaignCard::Single(CampaignSummary {
                campaign_name: "Spring Launch".to_string(),
                range: "01 Jan - 11 Jan".to_string(),
                days: 10,
            }),
            performance_metrics: PerformanceMetrics {
                current_metrics: InteractionTotals {
                    impressions: 150,
                    clicks: 5,
                    views: 25,
                },
            },
            volume_unit_cost_trend: VolumeUnitCostTrend {
                impressions_cpm: ImpressionsCpm {
                    impression: BTreeMap::from([("2024-01-05".to_string(), 150)]),
                    cpm: BTreeMap::from([("2024-01-05".to_string(), 5.5)]),
                },
            },
            campaign_table: CampaignTable {
                start_date: vec!["2024-01-01".to_string()],
                end_date: vec!["2024-01-11".to_string()],
                campaign_id: vec!["c-1".to_string()],
                campaign_name: vec!["Spring Launch".to_string()],
                effectiveness: vec![7],
                media: vec![5],
                creative: vec![6],
            },
        }
    }

    #[test]
    fn renders_every_section() {
        let report = build_report(
            &ScopeSelector::Campaign("c-1".to_string()),
            &window(),
            &sample_result(),
        );

        assert!(report.contains("Generated for c-1 (trend from 2024-01-01 to 2024-01-31)"));
        assert!(report.contains("- Spring Launch (01 Jan - 11 Jan, 10 days)"));
        assert!(report.contains("- Impressions: 150"));
        assert!(report.contains("| 2024-01-05 | 150 | 5.50 |"));
        assert!(report.contains("| Spring Launch | c-1 | 2024-01-01 | 2024-01-11 | 7 | 5 | 6 |"));
    }

    #[test]
    fn empty_sections_say_so() {
        let mut result = sample_result();
        result.campaign_card = CampaignCard::All(Vec::new());
        result.volume_unit_cost_trend.impressions_cpm = ImpressionsCpm::default();
        result.campaign_table = CampaignTable::default();

        let report = build_report(&ScopeSelector::All, &window(), &result);
        assert!(report.contains("Generated for all campaigns"));
        assert!(report.contains("No campaigns recorded."));
        assert!(report.contains("No activity in this window."));
        assert!(report.contains("No scores recorded."));
    }
}
