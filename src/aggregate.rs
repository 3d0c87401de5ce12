use crate::coerce::parse_date;
use crate::error::{AggregateError, Result};
use crate::models::{
    AggregationResult, CampaignCard, CampaignDailyRecord, CampaignScoreRecord, DateWindow,
    ScopeSelector,
};
use crate::source::RecordSource;
use crate::{rollup, scope, summary, table, trend};

/// Query parameters for one aggregation, as supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct AggregationRequest {
    pub campaign_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AggregationRequest {
    pub fn window(&self) -> Result<DateWindow> {
        parse_window(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// Both bounds are required; a missing one is reported by parameter name.
pub fn parse_window(start_date: Option<&str>, end_date: Option<&str>) -> Result<DateWindow> {
    let start = start_date.ok_or(AggregateError::MissingParameter("start_date"))?;
    let end = end_date.ok_or(AggregateError::MissingParameter("end_date"))?;

    Ok(DateWindow {
        start: parse_date("start_date", start)?,
        end: parse_date("end_date", end)?,
    })
}

/// Everything the builders need, already fetched. The trend window stays raw
/// until the campaign card has been built.
#[derive(Debug, Clone)]
pub struct AggregationInput {
    pub scope: ScopeSelector,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub daily: Vec<CampaignDailyRecord>,
    pub scores: Vec<CampaignScoreRecord>,
    pub campaign_name: Option<String>,
    pub campaign_dates: Option<(String, String)>,
}

/// Runs all four builders over one resolved scope. Any builder error aborts
/// the whole aggregation; a missing campaign is reported before window errors.
pub fn aggregate(input: &AggregationInput) -> Result<AggregationResult> {
    let campaign_card = match &input.scope {
        ScopeSelector::All => CampaignCard::All(summary::summarize_all(&input.scores)?),
        ScopeSelector::Campaign(id) => CampaignCard::Single(summary::summarize_single(
            id,
            input.campaign_name.clone(),
            input.campaign_dates.clone(),
        )?),
    };

    let window = parse_window(input.start_date.as_deref(), input.end_date.as_deref())?;
    let performance_metrics = rollup::rollup(&input.daily, &input.scope)?;
    let volume_unit_cost_trend =
        trend::volume_unit_cost_trend(&input.daily, &input.scope, &window)?;
    let campaign_table = table::campaign_table(&input.scores);

    Ok(AggregationResult {
        campaign_card,
        performance_metrics,
        volume_unit_cost_trend,
        campaign_table,
    })
}

/// Resolves scope, fetches the record batches from `source`, and aggregates.
pub async fn run<S: RecordSource>(
    source: &mut S,
    request: &AggregationRequest,
) -> Result<(ScopeSelector, AggregationResult)> {
    let scope = scope::resolve_scope(source, request.campaign_id.as_deref()).await;
    tracing::info!(
        scope = scope.label(),
        start = request.start_date.as_deref().unwrap_or_default(),
        end = request.end_date.as_deref().unwrap_or_default(),
        "aggregating campaigns"
    );

    let (campaign_name, campaign_dates) = match &scope {
        ScopeSelector::All => (None, None),
        ScopeSelector::Campaign(id) => (
            source.campaign_name(id).await?,
            source.campaign_dates(id).await?,
        ),
    };

    let input = AggregationInput {
        daily: source.daily_records(&scope).await?,
        scores: source.score_records().await?,
        scope,
        start_date: request.start_date.clone(),
        end_date: request.end_date.clone(),
        campaign_name,
        campaign_dates,
    };

    let result = aggregate(&input)?;
    Ok((input.scope, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn daily(campaign_id: &str, name: &str, date: &str, impressions: i64, cpm: &str) -> CampaignDailyRecord {
        CampaignDailyRecord {
            campaign_id: campaign_id.to_string(),
            campaign_name: name.to_string(),
            date: date.to_string(),
            impressions: impressions.to_string(),
            clicks: "2".to_string(),
            views: "3".to_string(),
            cpm: cpm.to_string(),
        }
    }

    fn scores(campaign_id: &str, name: &str, start: &str, end: &str, effectiveness: f64) -> CampaignScoreRecord {
        CampaignScoreRecord {
            campaign_id: campaign_id.to_string(),
            campaign_name: name.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            effectiveness: Some(effectiveness),
            media: Some(5.0),
            creative: Some(6.0),
        }
    }

    fn sample_source() -> MemorySource {
        MemorySource::new(
            vec![
                daily("c-1", "Spring Launch", "2024-01-05", 100, "2.00"),
                daily("c-2", "Summer Push", "2024-01-05", 50, "3.50"),
                daily("c-1", "Spring Launch", "2024-01-06", 40, "1.10"),
                daily("c-2", "Summer Push", "2024-03-01", 999, "9.99"),
            ],
            vec![
                scores("c-1", "Spring Launch", "2024-01-01", "2024-01-11", 7.0),
                scores("c-1", "Spring Launch", "2024-01-01", "2024-01-11", 8.0),
                scores("c-2", "Summer Push", "2024-01-03", "2024-03-01", 4.0),
            ],
        )
    }

    fn request(campaign_id: Option<&str>) -> AggregationRequest {
        AggregationRequest {
            campaign_id: campaign_id.map(str::to_string),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-31".to_string()),
        }
    }

    #[tokio::test]
    async fn all_scope_builds_every_facet() {
        let (scope, result) = run(&mut sample_source(), &request(None)).await.unwrap();
        assert_eq!(scope, ScopeSelector::All);

        match &result.campaign_card {
            CampaignCard::All(cards) => {
                assert_eq!(cards.len(), 2);
                assert_eq!(cards[0].range, "01 Jan - 11 Jan");
                assert_eq!(cards[1].days, 58);
            }
            CampaignCard::Single(_) => panic!("expected a card per campaign"),
        }

        assert_eq!(result.performance_metrics.current_metrics.impressions, 1189);
        assert_eq!(result.performance_metrics.current_metrics.clicks, 8);

        let series = &result.volume_unit_cost_trend.impressions_cpm;
        assert_eq!(series.impression["2024-01-05"], 150);
        assert!((series.cpm["2024-01-05"] - 5.50).abs() < 1e-9);
        assert!(!series.impression.contains_key("2024-03-01"));

        assert_eq!(result.campaign_table.campaign_id, vec!["c-1", "c-2"]);
        assert_eq!(result.campaign_table.effectiveness, vec![7, 4]);
    }

    #[tokio::test]
    async fn campaign_scope_narrows_card_rollup_and_trend() {
        let (scope, result) = run(&mut sample_source(), &request(Some("c-1"))).await.unwrap();
        assert_eq!(scope, ScopeSelector::Campaign("c-1".to_string()));

        match &result.campaign_card {
            CampaignCard::Single(card) => {
                assert_eq!(card.campaign_name, "Spring Launch");
                assert_eq!(card.range, "01 Jan - 11 Jan");
                assert_eq!(card.days, 10);
            }
            CampaignCard::All(_) => panic!("expected a single card"),
        }

        assert_eq!(result.performance_metrics.current_metrics.impressions, 140);
        assert_eq!(result.volume_unit_cost_trend.impressions_cpm.impression["2024-01-05"], 100);
        // the score table still covers every campaign
        assert_eq!(result.campaign_table.len(), 2);
    }

    #[tokio::test]
    async fn unknown_campaign_matches_all_scope_output() {
        let (_, all) = run(&mut sample_source(), &request(None)).await.unwrap();
        let (scope, unknown) = run(&mut sample_source(), &request(Some("c-404"))).await.unwrap();
        assert_eq!(scope, ScopeSelector::All);
        assert_eq!(unknown, all);
    }

    #[tokio::test]
    async fn missing_summary_dates_fail_the_request() {
        let mut source = sample_source();
        source.daily.push(daily("c-3", "Autumn Teaser", "2024-01-07", 10, "1.00"));

        let result = run(&mut source, &request(Some("c-3"))).await;
        assert!(matches!(
            result,
            Err(AggregateError::NotFound { campaign_id }) if campaign_id == "c-3"
        ));
    }

    #[tokio::test]
    async fn missing_window_bound_is_reported() {
        let mut req = request(None);
        req.end_date = None;
        let result = run(&mut sample_source(), &req).await;
        assert!(matches!(result, Err(AggregateError::MissingParameter("end_date"))));
    }

    #[tokio::test]
    async fn missing_campaign_wins_over_missing_window() {
        let mut source = sample_source();
        source.daily.push(daily("c-3", "Autumn Teaser", "2024-01-07", 10, "1.00"));
        let req = AggregationRequest {
            campaign_id: Some("c-3".to_string()),
            start_date: None,
            end_date: None,
        };

        let result = run(&mut source, &req).await;
        assert!(matches!(
            result,
            Err(AggregateError::NotFound { campaign_id }) if campaign_id == "c-3"
        ));
    }

    #[tokio::test]
    async fn malformed_record_aborts_everything() {
        let mut source = sample_source();
        source.daily.push(daily("c-2", "Summer Push", "2024-01-08", 1, "free"));

        let result = run(&mut source, &request(None)).await;
        assert!(matches!(result, Err(AggregateError::MalformedNumber { field: "cpm", .. })));
    }

    #[tokio::test]
    async fn serializes_with_report_keys() {
        let (_, result) = run(&mut sample_source(), &request(Some("c-1"))).await.unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["campaignCard"]["campaignName"], "Spring Launch");
        assert_eq!(json["performanceMetrics"]["currentMetrics"]["views"], 6);
        assert_eq!(
            json["volumeUnitCostTrend"]["impressionsCpm"]["impression"]["2024-01-06"],
            40
        );
        assert_eq!(json["campaignTable"]["adin_id"][1], "c-2");
        assert_eq!(json["campaignTable"]["campaign"][0], "Spring Launch");
    }
}
