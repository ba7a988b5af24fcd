use super::ui;
use crate::core::{
    Catalog, CurrencyPair, CurrencyRateProvider, RateSlot, RateState, valuation,
};
use anyhow::Result;
use comfy_table::Cell;
use std::sync::Arc;

/// Renders the catalog list view for the given rate state.
///
/// Converted prices show a loading placeholder until a rate is available,
/// including when the fetch for this activation failed.
pub fn render(catalog: &Catalog, state: &RateState, pair: &CurrencyPair) -> String {
    let title = ui::style_text("Export products", ui::StyleType::Title);
    if catalog.is_empty() {
        return format!(
            "{title}\n\n{}",
            ui::style_text(
                "No products yet. Use `add` in a session, or list them under `products:` in the config.",
                ui::StyleType::Subtle
            )
        );
    }

    let loading = format!("Loading {} price...", pair.to);
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Id"),
        ui::header_cell("Product"),
        ui::header_cell("Quantity"),
        ui::header_cell(&format!("Price ({})", pair.from)),
        ui::header_cell(&format!("Price ({})", pair.to)),
        ui::header_cell("Destination"),
    ]);

    for valued in valuation::value_catalog(catalog, state.rate()) {
        let converted = match valued.converted_price {
            Some(price) => ui::number_cell(format!("{price:.2}")),
            None => ui::loading_cell(&loading),
        };
        table.add_row(vec![
            ui::number_cell((valued.position + 1).to_string()),
            ui::number_cell(valued.id.to_string()),
            Cell::new(&valued.product.name),
            ui::number_cell(valued.product.quantity.to_string()),
            ui::number_cell(format!("{:.2}", valued.product.price_euro)),
            converted,
            Cell::new(&valued.product.destination),
        ]);
    }

    let rate_line = match state {
        RateState::Ready(quote) => format!(
            "1 {} = {} {}",
            pair.from,
            ui::style_text(&format!("{:.2}", quote.value), ui::StyleType::TotalValue),
            pair.to
        ),
        RateState::Loading | RateState::Unavailable => ui::style_text(
            &format!("Loading {} value...", pair.from),
            ui::StyleType::Subtle,
        ),
    };

    format!(
        "{title}\n\n{table}\n\n{}: {rate_line}",
        ui::style_text("Rate", ui::StyleType::TotalLabel)
    )
}

pub async fn run(
    catalog: &Catalog,
    provider: Arc<dyn CurrencyRateProvider>,
    pair: &CurrencyPair,
) -> Result<()> {
    let mut slot = RateSlot::spawn(provider, pair.clone());
    let spinner = ui::new_spinner(&format!("Fetching {pair} rate..."));
    let state = slot.settle().await;
    spinner.finish_and_clear();

    println!("{}", render(catalog, state, pair));
    Ok(())
}
