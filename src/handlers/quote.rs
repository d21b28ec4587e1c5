use chrono::{DateTime, Utc};
use frete_engine::{
    PricingError,
    lookup::{self, Quote, QuoteRequest},
    models::cargo::CargoSpec,
    utils::unit::{LengthUnit, MassUnit},
};
use thiserror::Error;
use tracing::info;

use crate::book::TariffBook;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Invalid dimensions {0}: expected WIDTHxHEIGHTxDEPTH")]
    InvalidDimensions(String),

    #[error("Cargo needs --product or both --dims and --weight")]
    MissingCargo,

    #[error("Declared value is required when quoting without a product")]
    MissingValue,

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Quote parameters as an operator enters them.
#[derive(Debug, Clone, Default)]
pub struct QuoteInput {
    pub destination: String,
    pub product: Option<String>,
    pub dims: Option<String>,
    pub weight: Option<f64>,
    pub length_unit: LengthUnit,
    pub mass_unit: MassUnit,
    pub value: Option<f64>,
    pub corridor: Option<String>,
    pub insurance_percent: Option<f64>,
    pub packaging_value: Option<f64>,
    pub version: Option<String>,
}

pub fn parse_dimensions(dims: &str) -> Result<(f64, f64, f64), QuoteError> {
    let parts = dims
        .split(['x', 'X', '*'])
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| QuoteError::InvalidDimensions(dims.to_string()))?;

    match parts.as_slice() {
        [width, height, depth] => Ok((*width, *height, *depth)),
        _ => Err(QuoteError::InvalidDimensions(dims.to_string())),
    }
}

/// Builds the quote request. A product supplies cargo, a default declared
/// value, and the packaging value added to the grand total; explicit
/// flags win over it.
pub fn build_request(
    book: &TariffBook,
    input: &QuoteInput,
    as_of: DateTime<Utc>,
) -> Result<QuoteRequest, QuoteError> {
    let product = input
        .product
        .as_deref()
        .map(|name| {
            book.product(name)
                .ok_or_else(|| QuoteError::UnknownProduct(name.to_string()))
        })
        .transpose()?;

    let cargo = match (&input.dims, input.weight, product) {
        (Some(dims), Some(weight), _) => {
            let (width, height, depth) = parse_dimensions(dims)?;
            CargoSpec::new(width, height, depth, weight)
                .with_units(input.length_unit, input.mass_unit)
        }
        (_, _, Some(product)) => product.cargo(),
        _ => return Err(QuoteError::MissingCargo),
    };

    let declared_value = input
        .value
        .or(product.map(|p| p.default_value))
        .ok_or(QuoteError::MissingValue)?;

    let secondary_value = input
        .packaging_value
        .or(product.map(|p| p.default_value));

    Ok(QuoteRequest {
        destination_id: input.destination.clone(),
        cargo,
        declared_value,
        corridor: input.corridor.clone(),
        insurance_percent: input.insurance_percent,
        secondary_value,
        version: input.version.clone(),
        as_of,
    })
}

pub fn handle_quote(
    book: &TariffBook,
    input: &QuoteInput,
    as_of: DateTime<Utc>,
) -> Result<Quote, QuoteError> {
    let request = build_request(book, input, as_of)?;
    let quote = lookup::quote(book, &request)?;

    info!(
        "quote for {} ({}) under version {}: total {:.2}, grand total {:.2}",
        quote.destination.id,
        quote.breakdown.category,
        quote.version,
        quote.breakdown.total,
        quote.breakdown.grand_total
    );

    Ok(quote)
}
