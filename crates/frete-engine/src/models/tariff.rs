use serde::{Deserialize, Serialize};

/// Tiered rate table for one destination category. Amounts are per
/// shipment; `overage_per_kg` applies to each kilogram above 100.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RateTable {
    pub up_to_10: f64,
    pub up_to_20: f64,
    pub up_to_40: f64,
    pub up_to_60: f64,
    pub up_to_100: f64,
    pub overage_per_kg: f64,
}

impl RateTable {
    pub fn tiers(&self) -> [f64; 5] {
        [
            self.up_to_10,
            self.up_to_20,
            self.up_to_40,
            self.up_to_60,
            self.up_to_100,
        ]
    }

    /// Tier amounts never decrease as the band grows.
    pub fn is_monotonic(&self) -> bool {
        self.tiers().windows(2).all(|pair| pair[0] <= pair[1])
    }
}

/// Parameters of one tariff version. Percentages are fractions in [0, 1].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricingParameters {
    /// Kilograms charged per cubic metre.
    pub volumetric_divisor: f64,
    pub insurance_percent: f64,
    pub insurance_min: f64,
    pub cargo_risk_percent_up_to_10k: f64,
    pub cargo_risk_percent_above_10k: f64,
    pub cargo_risk_min: f64,
    pub toll_unit: f64,
    pub tax_percent: f64,
}

impl Default for PricingParameters {
    fn default() -> Self {
        Self {
            volumetric_divisor: 300.0,
            insurance_percent: 0.005,
            insurance_min: 4.78,
            cargo_risk_percent_up_to_10k: 0.001,
            cargo_risk_percent_above_10k: 0.0023,
            cargo_risk_min: 1.10,
            toll_unit: 3.80,
            tax_percent: 0.12,
        }
    }
}

/// Adjustment tied to a named transport corridor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteCorridor {
    pub code: String,
    pub factor: f64,
    pub toll_points: Option<u32>,
    pub insurance_percent: Option<f64>,
}

/// Destination-category replacements for default percentages. Each field
/// falls back on its own.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RegionalOverride {
    /// Flat cargo-risk rate, applied regardless of the value threshold.
    pub cargo_risk_percent: Option<f64>,
    pub tax_percent: Option<f64>,
    pub insurance_percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_decreasing_tiers() {
        let mut table = RateTable {
            up_to_10: 25.0,
            up_to_20: 35.0,
            up_to_40: 55.0,
            up_to_60: 75.0,
            up_to_100: 120.0,
            overage_per_kg: 1.2,
        };
        assert!(table.is_monotonic());

        table.up_to_40 = 30.0;
        assert!(!table.is_monotonic());
    }
}
