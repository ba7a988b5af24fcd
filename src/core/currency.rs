//! Currency conversion abstractions

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The conversion applied to euro prices, e.g. `EUR` to `CLP`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl Default for CurrencyPair {
    fn default() -> Self {
        CurrencyPair {
            from: "EUR".to_string(),
            to: "CLP".to_string(),
        }
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

/// A single exchange rate observation.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    pub value: f64,
    pub observed_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_quote(&self, from: &str, to: &str) -> Result<RateQuote>;

    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        Ok(self.get_quote(from, to).await?.value)
    }
}
