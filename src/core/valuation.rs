//! Derived views over the catalog: converted prices and the price ranking
//! used by the chart.
use crate::core::catalog::Catalog;
use crate::core::currency::{CurrencyPair, CurrencyRateProvider, RateQuote};
use crate::core::product::{Product, ProductId};
use tracing::{debug, warn};

/// Number of products shown in the chart unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 4;

/// Fetches the current rate for `pair`.
///
/// Every failure (network, HTTP status, body shape) collapses to `None`; the
/// caller only learns whether a rate is available.
pub async fn fetch_rate(provider: &dyn CurrencyRateProvider, pair: &CurrencyPair) -> Option<RateQuote> {
    match provider.get_quote(&pair.from, &pair.to).await {
        Ok(quote) => {
            debug!(%pair, rate = quote.value, "Resolved exchange rate");
            Some(quote)
        }
        Err(e) => {
            warn!(%pair, error = %e, "Exchange rate unavailable");
            None
        }
    }
}

pub fn converted_price(product: &Product, rate: f64) -> f64 {
    product.price_euro * rate
}

/// A catalog entry enriched with its converted price, if a rate is known.
#[derive(Debug, Clone)]
pub struct ValuedProduct<'a> {
    pub position: usize,
    pub id: ProductId,
    pub product: &'a Product,
    pub converted_price: Option<f64>,
}

pub fn value_catalog(catalog: &Catalog, rate: Option<f64>) -> Vec<ValuedProduct<'_>> {
    catalog
        .list()
        .iter()
        .enumerate()
        .map(|(position, entry)| ValuedProduct {
            position,
            id: entry.id,
            product: &entry.product,
            converted_price: rate.map(|r| converted_price(&entry.product, r)),
        })
        .collect()
}

/// The most expensive products, highest price first.
#[derive(Debug, Clone)]
pub struct Ranking<'a> {
    items: Vec<&'a Product>,
    max_price: f64,
}

impl<'a> Ranking<'a> {
    pub fn items(&self) -> &[&'a Product] {
        &self.items
    }

    /// Price of the top product, or `1.0` for an empty ranking so bar
    /// heights can always be computed as `price / max_price`.
    pub fn max_price(&self) -> f64 {
        self.max_price
    }

    /// Height of `product`'s bar relative to the top product, in `0.0..=1.0`.
    pub fn bar_fraction(&self, product: &Product) -> f64 {
        if self.max_price <= 0.0 {
            return 0.0;
        }
        (product.price_euro / self.max_price).clamp(0.0, 1.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Sorts by descending euro price and keeps the first `n`.
///
/// The sort is stable, so products with equal prices keep their insertion
/// order.
pub fn top_n<'a, I>(products: I, n: usize) -> Ranking<'a>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut items: Vec<&Product> = products.into_iter().collect();
    items.sort_by(|a, b| b.price_euro.total_cmp(&a.price_euro));
    items.truncate(n);
    let max_price = items.first().map_or(1.0, |p| p.price_euro);
    Ranking { items, max_price }
}
