//! Export product records and the add-product form.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;
use tracing::debug;

/// Stable identifier assigned by the catalog when a product is appended.
///
/// Unlike list positions, an id keeps referring to the same product after
/// other products are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(u64);

impl ProductId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        ProductId(value)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub quantity: u32,
    pub price_euro: f64,
    pub destination: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        price_euro: f64,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            price_euro,
            destination: destination.into(),
        }
    }

    /// Checks a product that did not come through [`ProductForm`], e.g. one
    /// seeded from the config file.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingField(Field::Name));
        }
        if self.destination.trim().is_empty() {
            return Err(FormError::MissingField(Field::Destination));
        }
        if !is_valid_price(self.price_euro) {
            return Err(FormError::InvalidNumber {
                field: Field::PriceEuro,
                value: self.price_euro.to_string(),
            });
        }
        Ok(())
    }
}

/// The fields of the add-product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Quantity,
    PriceEuro,
    Destination,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Field::Name => "name",
                Field::Quantity => "quantity",
                Field::PriceEuro => "price",
                Field::Destination => "destination",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(Field),
    #[error("{field} must be a non-negative number, got '{value}'")]
    InvalidNumber { field: Field, value: String },
}

/// How the form treats quantity and price text that is not a valid number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// Unparseable numbers are stored as zero.
    #[default]
    Lenient,
    /// Unparseable numbers reject the submission.
    Strict,
}

/// Raw text entered in the add-product form.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub quantity: String,
    pub price_euro: String,
    pub destination: String,
}

impl ProductForm {
    /// Turns the form into a product.
    ///
    /// All four fields must be non-blank. Numeric fields are parsed according
    /// to `mode`; negative or non-finite values count as unparseable.
    pub fn submit(&self, mode: InputMode) -> Result<Product, FormError> {
        let name = required(Field::Name, &self.name)?;
        let quantity = required(Field::Quantity, &self.quantity)?;
        let price_euro = required(Field::PriceEuro, &self.price_euro)?;
        let destination = required(Field::Destination, &self.destination)?;

        let quantity = parse_number(Field::Quantity, quantity, mode, |s| s.parse::<u32>().ok())?;
        let price_euro = parse_number(Field::PriceEuro, price_euro, mode, |s| {
            s.parse::<f64>().ok().filter(|p| is_valid_price(*p))
        })?;

        Ok(Product::new(name, quantity, price_euro, destination))
    }
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

fn required(field: Field, value: &str) -> Result<&str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(value)
}

fn parse_number<T: Default>(
    field: Field,
    raw: &str,
    mode: InputMode,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, FormError> {
    match parse(raw) {
        Some(value) => Ok(value),
        None => match mode {
            InputMode::Lenient => {
                debug!(%field, raw, "Coercing unparseable input to zero");
                Ok(T::default())
            }
            InputMode::Strict => Err(FormError::InvalidNumber {
                field,
                value: raw.to_string(),
            }),
        },
    }
}
