use anyhow::Context;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
        let max_connections = match std::env::var("CAMPAIGN_DB_MAX_CONNECTIONS") {
            Ok(raw) => parse_max_connections(&raw)?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

fn parse_max_connections(raw: &str) -> anyhow::Result<u32> {
    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("CAMPAIGN_DB_MAX_CONNECTIONS must be a positive integer, got {raw:?}"))?;
    anyhow::ensure!(value > 0, "CAMPAIGN_DB_MAX_CONNECTIONS must be at least 1");
    Ok(value)
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_connections_must_be_positive() {
        assert_eq!(parse_max_connections("8").unwrap(), 8);
        assert!(parse_max_connections("0").is_err());
        assert!(parse_max_connections("many").is_err());
    }
}
