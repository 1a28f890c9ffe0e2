use anyhow::{anyhow, Result};

use crate::form4::signal::Tier;

/// Environment-driven wiring for pipeline hosts.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub database_url: String,
    pub alert_floor: Tier,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow!("DATABASE_URL environment variable not set"))?;

        let alert_floor = match std::env::var("ALERT_TIER_FLOOR") {
            Ok(value) => parse_tier(&value)?,
            Err(_) => Tier::Medium,
        };

        Ok(Self {
            database_url,
            alert_floor,
        })
    }
}

fn parse_tier(value: &str) -> Result<Tier> {
    match value.trim().to_lowercase().as_str() {
        "low" => Ok(Tier::Low),
        "medium" => Ok(Tier::Medium),
        "high" => Ok(Tier::High),
        other => Err(anyhow!(
            "ALERT_TIER_FLOOR must be low, medium or high, got {:?}",
            other
        )),
    }
}
