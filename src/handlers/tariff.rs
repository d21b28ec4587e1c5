use frete_engine::{
    PricingError,
    lookup::{self, PricingSource, ResolvedTariff},
    models::tariff::RegionalOverride,
};
use serde::Serialize;

use crate::book::TariffBook;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TariffReport {
    pub version: String,
    pub category: String,
    pub tariff: ResolvedTariff,
    pub regional: Option<RegionalOverride>,
}

pub fn handle_tariff(
    book: &TariffBook,
    category: &str,
    version: Option<&str>,
) -> Result<TariffReport, PricingError> {
    let version = lookup::resolve_version(book, version)?;
    if book.resolve_parameters(&version).is_none() {
        return Err(PricingError::ParametersNotFound(version));
    }

    let tariff = lookup::resolve_tariff(book, category, &version)?;
    let regional = book.resolve_regional_override(category, &version);

    Ok(TariffReport {
        category: category.to_string(),
        version,
        tariff,
        regional,
    })
}
