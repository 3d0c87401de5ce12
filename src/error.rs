use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("campaign {campaign_id} not found")]
    NotFound { campaign_id: String },

    #[error("missing request parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid date in {field}: {value:?}")]
    MalformedDate {
        field: &'static str,
        value: String,
        source: chrono::ParseError,
    },

    #[error("invalid number in {field}: {value:?}")]
    MalformedNumber { field: &'static str, value: String },

    #[error("failed to fetch campaign records")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, AggregateError>;

impl From<sqlx::Error> for AggregateError {
    fn from(e: sqlx::Error) -> Self {
        AggregateError::Source(e.into())
    }
}

impl From<csv::Error> for AggregateError {
    fn from(e: csv::Error) -> Self {
        AggregateError::Source(e.into())
    }
}
