use super::ui;
use crate::core::{CurrencyPair, CurrencyRateProvider, RateQuote, valuation::fetch_rate};
use anyhow::Result;

pub fn render(quote: Option<&RateQuote>, pair: &CurrencyPair) -> String {
    match quote {
        Some(quote) => {
            let mut line = format!(
                "1 {} = {} {}",
                pair.from,
                ui::style_text(&format!("{:.2}", quote.value), ui::StyleType::TotalValue),
                pair.to
            );
            if let Some(observed_at) = quote.observed_at {
                line.push_str(&ui::style_text(
                    &format!(" (as of {})", observed_at.format("%Y-%m-%d")),
                    ui::StyleType::Subtle,
                ));
            }
            line
        }
        None => ui::style_text(&format!("{pair} rate unavailable"), ui::StyleType::Error),
    }
}

pub async fn run(provider: &dyn CurrencyRateProvider, pair: &CurrencyPair) -> Result<()> {
    let spinner = ui::new_spinner(&format!("Fetching {pair} rate..."));
    let quote = fetch_rate(provider, pair).await;
    spinner.finish_and_clear();

    println!("{}", render(quote.as_ref(), pair));
    Ok(())
}
