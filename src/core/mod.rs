//! Core business logic abstractions

pub mod catalog;
pub mod config;
pub mod currency;
pub mod log;
pub mod product;
pub mod rate;
pub mod valuation;

// Re-export main types for cleaner imports
pub use catalog::{Catalog, CatalogEntry};
pub use currency::{CurrencyPair, CurrencyRateProvider, RateQuote};
pub use product::{FormError, InputMode, Product, ProductForm, ProductId};
pub use rate::{RateSlot, RateState};
