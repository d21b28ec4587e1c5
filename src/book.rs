use chrono::{DateTime, Utc};
use config::{Config, ConfigError, File};
use frete_engine::{
    lookup::PricingSource,
    models::{
        cargo::CargoSpec,
        destination::Destination,
        surcharge::{AmountKind, SpecialSurcharge, SurchargeKind},
        tariff::{PricingParameters, RateTable, RegionalOverride, RouteCorridor},
    },
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum BookError {
    #[error("Tariff book loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Active version {0} is not defined in the book")]
    UnknownActiveVersion(String),

    #[error("Tariff {category} in version {version} has decreasing tier amounts")]
    NonMonotonicTariff { category: String, version: String },

    #[error("Duplicate destination id {0}")]
    DuplicateDestination(String),
}

/// Complete tariff row: the rate table plus optional regional overrides.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TariffEntry {
    pub category: String,
    pub up_to_10: f64,
    pub up_to_20: f64,
    pub up_to_40: f64,
    pub up_to_60: f64,
    pub up_to_100: f64,
    pub overage_per_kg: f64,
    #[serde(default)]
    pub cargo_risk_percent: Option<f64>,
    #[serde(default)]
    pub tax_percent: Option<f64>,
    #[serde(default)]
    pub insurance_percent: Option<f64>,
}

impl TariffEntry {
    pub fn table(&self) -> RateTable {
        RateTable {
            up_to_10: self.up_to_10,
            up_to_20: self.up_to_20,
            up_to_40: self.up_to_40,
            up_to_60: self.up_to_60,
            up_to_100: self.up_to_100,
            overage_per_kg: self.overage_per_kg,
        }
    }

    pub fn regional(&self) -> Option<RegionalOverride> {
        let regional = RegionalOverride {
            cargo_risk_percent: self.cargo_risk_percent,
            tax_percent: self.tax_percent,
            insurance_percent: self.insurance_percent,
        };
        (regional != RegionalOverride::default()).then_some(regional)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TariffVersion {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub parameters: PricingParameters,
    #[serde(default)]
    pub tariffs: Vec<TariffEntry>,
    #[serde(default)]
    pub legacy_tariffs: Vec<TariffEntry>,
    #[serde(default)]
    pub corridors: Vec<RouteCorridor>,
}

/// Stored surcharge row, keyed by destination.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SurchargeEntry {
    pub destination_id: String,
    pub kind: SurchargeKind,
    pub amount: Option<f64>,
    #[serde(default)]
    pub amount_kind: Option<AmountKind>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub justification: Option<String>,
}

impl SurchargeEntry {
    pub fn record(&self) -> SpecialSurcharge {
        SpecialSurcharge {
            kind: self.kind,
            amount: self.amount,
            amount_kind: self.amount_kind,
            valid_until: self.valid_until,
            description: self.description.clone(),
            justification: self.justification.clone(),
        }
    }
}

/// A catalogued item with its packaged dimensions and invoice value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub width_cm: f64,
    pub height_cm: f64,
    pub depth_cm: f64,
    pub real_weight_kg: f64,
    pub default_value: f64,
}

impl Product {
    pub fn cargo(&self) -> CargoSpec {
        CargoSpec::new(
            self.width_cm,
            self.height_cm,
            self.depth_cm,
            self.real_weight_kg,
        )
    }
}

/// Every tariff version, destination, surcharge and product the desk
/// quotes from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TariffBook {
    pub active_version: Option<String>,
    #[serde(default)]
    pub versions: Vec<TariffVersion>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub surcharges: Vec<SurchargeEntry>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl TariffBook {
    pub fn load(path: &Path) -> Result<Self, BookError> {
        let book = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize::<TariffBook>()?;

        book.validate()?;

        info!(
            "Loaded tariff book {} with {} versions and {} destinations",
            path.display(),
            book.versions.len(),
            book.destinations.len()
        );

        Ok(book)
    }

    pub fn validate(&self) -> Result<(), BookError> {
        if let Some(active) = &self.active_version {
            if self.version(active).is_none() {
                return Err(BookError::UnknownActiveVersion(active.clone()));
            }
        }

        for version in &self.versions {
            for entry in version.tariffs.iter().chain(&version.legacy_tariffs) {
                if !entry.table().is_monotonic() {
                    return Err(BookError::NonMonotonicTariff {
                        category: entry.category.clone(),
                        version: version.id.clone(),
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for destination in &self.destinations {
            if !seen.insert(destination.id.as_str()) {
                return Err(BookError::DuplicateDestination(destination.id.clone()));
            }
        }

        for entry in &self.surcharges {
            if !seen.contains(entry.destination_id.as_str()) {
                warn!(
                    "Surcharge for unknown destination {} will never apply",
                    entry.destination_id
                );
            }
        }

        Ok(())
    }

    pub fn version(&self, id: &str) -> Option<&TariffVersion> {
        self.versions.iter().find(|v| v.id == id)
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    fn complete_entry(&self, category: &str, version: &str) -> Option<&TariffEntry> {
        self.version(version)?
            .tariffs
            .iter()
            .find(|t| t.category == category)
    }
}

impl PricingSource for TariffBook {
    fn active_version(&self) -> Option<String> {
        self.active_version.clone()
    }

    fn resolve_parameters(&self, version: &str) -> Option<PricingParameters> {
        self.version(version).map(|v| v.parameters.clone())
    }

    fn resolve_complete_tariff(&self, category: &str, version: &str) -> Option<RateTable> {
        self.complete_entry(category, version).map(TariffEntry::table)
    }

    fn resolve_legacy_tariff(&self, category: &str, version: &str) -> Option<RateTable> {
        self.version(version)?
            .legacy_tariffs
            .iter()
            .find(|t| t.category == category)
            .map(TariffEntry::table)
    }

    fn resolve_regional_override(
        &self,
        category: &str,
        version: &str,
    ) -> Option<RegionalOverride> {
        self.complete_entry(category, version)?.regional()
    }

    fn resolve_corridor(&self, code: &str, version: &str) -> Option<RouteCorridor> {
        self.version(version)?
            .corridors
            .iter()
            .find(|c| c.code == code)
            .cloned()
    }

    fn resolve_destination(&self, destination_id: &str) -> Option<Destination> {
        self.destinations
            .iter()
            .find(|d| d.id == destination_id)
            .cloned()
    }

    fn resolve_special_surcharges(&self, destination_id: &str) -> Vec<SpecialSurcharge> {
        self.surcharges
            .iter()
            .filter(|s| s.destination_id == destination_id)
            .map(SurchargeEntry::record)
            .collect()
    }
}
