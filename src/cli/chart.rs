use super::ui;
use crate::core::{Catalog, valuation::Ranking, valuation::top_n};
use anyhow::Result;
use console::style;

/// Width of the tallest bar, in characters.
pub const BAR_WIDTH: usize = 40;

/// Renders a horizontal bar chart of the ranking, bars scaled to the most
/// expensive product.
pub fn render(ranking: &Ranking<'_>, top: usize) -> String {
    let mut output = format!(
        "{}\n\n",
        ui::style_text(
            &format!("Top {top} most expensive products"),
            ui::StyleType::Title
        )
    );

    if ranking.is_empty() {
        output.push_str(&ui::style_text(
            "No products to chart.",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    let label_width = ranking
        .items()
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);

    let lines: Vec<String> = ranking
        .items()
        .iter()
        .map(|product| {
            let len = (ranking.bar_fraction(product) * BAR_WIDTH as f64).round() as usize;
            let bar = style("█".repeat(len)).cyan();
            let padding = " ".repeat(BAR_WIDTH - len);
            format!(
                "{:<label_width$} │{bar}{padding} {:.2} €",
                product.name, product.price_euro
            )
        })
        .collect();
    output.push_str(&lines.join("\n"));
    output
}

pub fn run(catalog: &Catalog, top: usize) -> Result<()> {
    let ranking = top_n(catalog.products(), top);
    println!("{}", render(&ranking, top));
    Ok(())
}
