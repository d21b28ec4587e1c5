use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::{
    engine,
    error::{PricingError, Result},
    models::{
        breakdown::PricingBreakdown,
        cargo::{CargoSpec, PricingRequest},
        destination::{DeliveryWindow, Destination},
        surcharge::SpecialSurcharge,
        tariff::{PricingParameters, RateTable, RegionalOverride, RouteCorridor},
    },
};

/// Record store the engine's inputs are looked up in. Implementations may
/// do I/O; the engine itself never calls them.
pub trait PricingSource {
    fn active_version(&self) -> Option<String>;

    fn resolve_parameters(&self, version: &str) -> Option<PricingParameters>;

    /// Current per-version tariff table.
    fn resolve_complete_tariff(&self, category: &str, version: &str) -> Option<RateTable>;

    /// Tariff table kept for versions imported before the complete table.
    fn resolve_legacy_tariff(&self, category: &str, version: &str) -> Option<RateTable>;

    fn resolve_regional_override(&self, category: &str, version: &str)
    -> Option<RegionalOverride>;

    fn resolve_corridor(&self, code: &str, version: &str) -> Option<RouteCorridor>;

    fn resolve_destination(&self, destination_id: &str) -> Option<Destination>;

    fn resolve_special_surcharges(&self, destination_id: &str) -> Vec<SpecialSurcharge>;
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TariffOrigin {
    Complete,
    Legacy,
}

impl fmt::Display for TariffOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TariffOrigin::Complete => write!(f, "complete"),
            TariffOrigin::Legacy => write!(f, "legacy"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolvedTariff {
    pub table: RateTable,
    pub origin: TariffOrigin,
}

/// Complete table first; a missing complete table falls back to the legacy
/// table. Missing both is `TariffNotFound`.
pub fn resolve_tariff<S: PricingSource + ?Sized>(
    source: &S,
    category: &str,
    version: &str,
) -> Result<ResolvedTariff> {
    if let Some(table) = source.resolve_complete_tariff(category, version) {
        debug!("complete tariff resolved for {category} in version {version}");
        return Ok(ResolvedTariff {
            table,
            origin: TariffOrigin::Complete,
        });
    }

    if let Some(table) = source.resolve_legacy_tariff(category, version) {
        warn!("falling back to legacy tariff for {category} in version {version}");
        return Ok(ResolvedTariff {
            table,
            origin: TariffOrigin::Legacy,
        });
    }

    Err(PricingError::TariffNotFound {
        category: category.to_string(),
        version: version.to_string(),
    })
}

/// Version to price against: the requested one, else the active one.
pub fn resolve_version<S: PricingSource + ?Sized>(
    source: &S,
    requested: Option<&str>,
) -> Result<String> {
    requested
        .map(str::to_string)
        .or_else(|| source.active_version())
        .ok_or_else(|| PricingError::ParametersNotFound("<active>".into()))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuoteRequest {
    pub destination_id: String,
    pub cargo: CargoSpec,
    pub declared_value: f64,
    pub corridor: Option<String>,
    pub insurance_percent: Option<f64>,
    pub secondary_value: Option<f64>,
    pub version: Option<String>,
    pub as_of: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Quote {
    pub version: String,
    pub destination: Destination,
    pub tariff_origin: TariffOrigin,
    pub delivery: Option<DeliveryWindow>,
    pub breakdown: PricingBreakdown,
}

/// Looks every input up once, then prices the shipment.
///
/// An unknown corridor code is treated as no corridor.
pub fn quote<S: PricingSource + ?Sized>(source: &S, request: &QuoteRequest) -> Result<Quote> {
    let destination = source
        .resolve_destination(&request.destination_id)
        .ok_or_else(|| PricingError::DestinationNotFound(request.destination_id.clone()))?;
    let category = destination.category_code();

    let version = resolve_version(source, request.version.as_deref())?;
    let parameters = source
        .resolve_parameters(&version)
        .ok_or_else(|| PricingError::ParametersNotFound(version.clone()))?;
    let tariff = resolve_tariff(source, &category, &version)?;
    let regional = source.resolve_regional_override(&category, &version);

    let corridor = request.corridor.as_deref().and_then(|code| {
        let found = source.resolve_corridor(code, &version);
        if found.is_none() {
            warn!("unknown corridor {code} in version {version}, pricing without it");
        }
        found
    });

    let surcharges = source.resolve_special_surcharges(&destination.id);

    let pricing = PricingRequest {
        cargo: request.cargo.clone(),
        declared_value: request.declared_value,
        category,
        corridor: corridor.as_ref().map(|c| c.code.clone()),
        insurance_percent: request.insurance_percent,
        secondary_value: request.secondary_value,
        as_of: request.as_of,
    };

    let breakdown = engine::compute(
        &pricing,
        &tariff.table,
        &parameters,
        regional.as_ref(),
        corridor.as_ref(),
        &surcharges,
    )?;

    Ok(Quote {
        version,
        delivery: destination.delivery_window(),
        destination,
        tariff_origin: tariff.origin,
        breakdown,
    })
}
