use crate::core::config::MindicadorProviderConfig;
use crate::core::currency::{CurrencyRateProvider, RateQuote};
use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Currency rates from mindicador.cl, which quotes every indicator in
/// Chilean pesos.
pub struct MindicadorProvider {
    base_url: String,
    client: reqwest::Client,
}

impl MindicadorProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("exportrack/1.0")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(MindicadorProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &MindicadorProviderConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn indicator(from: &str, to: &str) -> Result<&'static str> {
        if !to.eq_ignore_ascii_case("CLP") {
            bail!("mindicador only quotes rates in CLP, not {}", to);
        }
        match from.to_uppercase().as_str() {
            "EUR" => Ok("euro"),
            "USD" => Ok("dolar"),
            other => Err(anyhow!("No mindicador indicator for currency: {}", other)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IndicatorResponse {
    serie: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SerieEntry {
    valor: f64,
    fecha: Option<String>,
}

fn parse_quote(body: &str) -> Result<RateQuote> {
    let response: IndicatorResponse = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => {
            error!(error = ?e, response = %body, "Failed to parse indicator response");
            return Err(e).context("Failed to parse indicator response");
        }
    };

    // Only the latest observation matters; older entries are not inspected.
    let first = response
        .serie
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Empty serie array"))?;
    let entry: SerieEntry =
        serde_json::from_value(first).context("Missing numeric 'valor' in latest serie entry")?;

    let observed_at = entry.fecha.as_deref().and_then(|fecha| {
        DateTime::parse_from_rfc3339(fecha)
            .map(|dt| dt.with_timezone(&Utc))
            .inspect_err(|e| debug!("Ignoring unparseable fecha '{}': {}", fecha, e))
            .ok()
    });

    Ok(RateQuote {
        value: entry.valor,
        observed_at,
    })
}

#[async_trait]
impl CurrencyRateProvider for MindicadorProvider {
    #[instrument(
        name = "MindicadorRateFetch",
        skip(self),
        fields(from = %from, to = %to)
    )]
    async fn get_quote(&self, from: &str, to: &str) -> Result<RateQuote> {
        let indicator = Self::indicator(from, to)?;
        let url = format!("{}/api/{}", self.base_url, indicator);
        debug!("Requesting rate from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request error for URL: {url}"))?
            .error_for_status()
            .with_context(|| format!("Unexpected status for URL: {url}"))?;

        let body = response
            .text()
            .await
            .context("Failed to get response text")?;

        let quote = parse_quote(&body)?;
        debug!(rate = quote.value, "Received mindicador rate");
        Ok(quote)
    }
}
