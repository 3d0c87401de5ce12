use anyhow::Context;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Row};

use crate::config::Config;
use crate::error::Result;
use crate::models::{CampaignDailyRecord, CampaignScoreRecord, ScopeSelector};
use crate::source::RecordSource;

pub async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set unless --daily-csv and --scores-csv are given")?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")
}

/// A single pooled connection held for the duration of one request. Dropping
/// the source returns the connection to the pool.
pub struct PgSource {
    conn: PoolConnection<Postgres>,
}

impl PgSource {
    pub async fn acquire(pool: &PgPool) -> anyhow::Result<Self> {
        let conn = pool
            .acquire()
            .await
            .context("failed to acquire a database connection")?;
        Ok(Self { conn })
    }
}

impl RecordSource for PgSource {
    async fn campaign_exists(&mut self, campaign_id: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM tbl_daily_campaigns WHERE campaign_id::text = $1 LIMIT 1")
            .bind(campaign_id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row.is_some())
    }

    async fn daily_records(&mut self, scope: &ScopeSelector) -> Result<Vec<CampaignDailyRecord>> {
        let mut query = String::from(
            "SELECT campaign_id::text AS campaign_id, \
             COALESCE(campaign_name, '') AS campaign_name, date::text AS date, \
             impressions::text AS impressions, clicks::text AS clicks, \
             views::text AS views, cpm::text AS cpm \
             FROM tbl_daily_campaigns",
        );

        if let ScopeSelector::Campaign(_) = scope {
            query.push_str(" WHERE campaign_id::text = $1");
        }

        let mut rows = sqlx::query(&query);

        if let ScopeSelector::Campaign(id) = scope {
            rows = rows.bind(id);
        }

        let records = rows.fetch_all(&mut *self.conn).await?;
        let mut daily = Vec::with_capacity(records.len());

        for row in records {
            daily.push(CampaignDailyRecord {
                campaign_id: row.try_get("campaign_id")?,
                campaign_name: row.try_get("campaign_name")?,
                date: row.try_get("date")?,
                impressions: row.try_get("impressions")?,
                clicks: row.try_get("clicks")?,
                views: row.try_get("views")?,
                cpm: row.try_get("cpm")?,
            });
        }

        Ok(daily)
    }

    async fn score_records(&mut self) -> Result<Vec<CampaignScoreRecord>> {
        let records = sqlx::query(
            r#"
            SELECT campaign_id::text AS campaign_id,
                   COALESCE(campaign_name, '') AS campaign_name,
                   start_date::text AS start_date, end_date::text AS end_date,
                   effectiveness::float8 AS effectiveness,
                   media::float8 AS media,
                   creative::float8 AS creative
            FROM tbl_daily_scores
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        let mut scores = Vec::with_capacity(records.len());

        for row in records {
            scores.push(CampaignScoreRecord {
                campaign_id: row.try_get("campaign_id")?,
                campaign_name: row.try_get("campaign_name")?,
                start_date: row.try_get("start_date")?,
                end_date: row.try_get("end_date")?,
                effectiveness: row.try_get("effectiveness")?,
                media: row.try_get("media")?,
                creative: row.try_get("creative")?,
            });
        }

        Ok(scores)
    }

    async fn campaign_name(&mut self, campaign_id: &str) -> Result<Option<String>> {
        let row = sqlx::query(
            "SELECT campaign_name FROM tbl_daily_campaigns WHERE campaign_id::text = $1 LIMIT 1",
        )
        .bind(campaign_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        match row {
            Some(row) => Ok(row.try_get("campaign_name")?),
            None => Ok(None),
        }
    }

    async fn campaign_dates(&mut self, campaign_id: &str) -> Result<Option<(String, String)>> {
        let row = sqlx::query(
            "SELECT start_date::text AS start_date, end_date::text AS end_date \
             FROM tbl_daily_scores WHERE campaign_id::text = $1 LIMIT 1",
        )
        .bind(campaign_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        match row {
            Some(row) => {
                let start: Option<String> = row.try_get("start_date")?;
                let end: Option<String> = row.try_get("end_date")?;
                Ok(start.zip(end))
            }
            None => Ok(None),
        }
    }
}
