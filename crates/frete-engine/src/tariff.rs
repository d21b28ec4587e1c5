use serde::{Deserialize, Serialize};

use crate::models::tariff::RateTable;

/// Inclusive upper bounds of the weight bands, in kilograms.
pub const BAND_LIMITS: [u32; 5] = [10, 20, 40, 60, 100];

/// Top band boundary; weight above it is charged per kilogram.
pub const OVERAGE_THRESHOLD: u32 = 100;

/// Tariff amount split into the band price and the per-kilogram overage.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct TariffAmount {
    pub base: f64,
    pub overage: f64,
    pub overage_weight: u32,
}

impl TariffAmount {
    pub fn total(&self) -> f64 {
        self.base + self.overage
    }
}

impl RateTable {
    /// Band price for `weight`, ties going to the lower band.
    pub fn band_amount(&self, weight: u32) -> f64 {
        let tiers = self.tiers();
        BAND_LIMITS
            .iter()
            .position(|limit| weight <= *limit)
            .map_or(self.up_to_100, |band| tiers[band])
    }

    pub fn amount_for(&self, weight: u32) -> TariffAmount {
        let overage_weight = weight.saturating_sub(OVERAGE_THRESHOLD);

        TariffAmount {
            base: self.band_amount(weight),
            overage: overage_weight as f64 * self.overage_per_kg,
            overage_weight,
        }
    }
}
