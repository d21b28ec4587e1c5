use serde::{Deserialize, Serialize};

use crate::models::tariff::{PricingParameters, RegionalOverride, RouteCorridor};

/// Declared value at or below which the lower cargo-risk rate applies.
pub const CARGO_RISK_VALUE_THRESHOLD: f64 = 10_000.0;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum CargoRiskRate {
    /// One regional rate regardless of declared value.
    Flat(f64),
    Tiered { up_to_threshold: f64, above_threshold: f64 },
}

impl CargoRiskRate {
    pub fn for_value(&self, declared_value: f64) -> f64 {
        match *self {
            CargoRiskRate::Flat(rate) => rate,
            CargoRiskRate::Tiered {
                up_to_threshold,
                above_threshold,
            } => {
                if declared_value <= CARGO_RISK_VALUE_THRESHOLD {
                    up_to_threshold
                } else {
                    above_threshold
                }
            }
        }
    }
}

/// Every parameter the calculation needs, with all overrides settled.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ResolvedParameters {
    pub volumetric_divisor: f64,
    pub insurance_percent: f64,
    pub insurance_min: f64,
    pub cargo_risk: CargoRiskRate,
    pub cargo_risk_min: f64,
    pub toll_unit: f64,
    pub tax_percent: f64,
}

/// Settles each parameter independently. Insurance resolves corridor,
/// then regional override, then the request, then the version default.
pub fn resolve(
    params: &PricingParameters,
    regional: Option<&RegionalOverride>,
    corridor: Option<&RouteCorridor>,
    requested_insurance: Option<f64>,
) -> ResolvedParameters {
    let insurance_percent = corridor
        .and_then(|c| c.insurance_percent)
        .or_else(|| regional.and_then(|r| r.insurance_percent))
        .or(requested_insurance)
        .unwrap_or(params.insurance_percent);

    let cargo_risk = match regional.and_then(|r| r.cargo_risk_percent) {
        Some(rate) => CargoRiskRate::Flat(rate),
        None => CargoRiskRate::Tiered {
            up_to_threshold: params.cargo_risk_percent_up_to_10k,
            above_threshold: params.cargo_risk_percent_above_10k,
        },
    };

    let tax_percent = regional
        .and_then(|r| r.tax_percent)
        .unwrap_or(params.tax_percent);

    ResolvedParameters {
        volumetric_divisor: params.volumetric_divisor,
        insurance_percent,
        insurance_min: params.insurance_min,
        cargo_risk,
        cargo_risk_min: params.cargo_risk_min,
        toll_unit: params.toll_unit,
        tax_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn corridor(insurance_percent: Option<f64>) -> RouteCorridor {
        RouteCorridor {
            code: "SP-PR".into(),
            factor: 1.0,
            toll_points: None,
            insurance_percent,
        }
    }

    #[test]
    fn defaults_without_override() {
        let params = PricingParameters::default();
        assert_eq!(
            resolve(&params, None, None, None),
            ResolvedParameters {
                volumetric_divisor: 300.0,
                insurance_percent: 0.005,
                insurance_min: 4.78,
                cargo_risk: CargoRiskRate::Tiered {
                    up_to_threshold: 0.001,
                    above_threshold: 0.0023,
                },
                cargo_risk_min: 1.10,
                toll_unit: 3.80,
                tax_percent: 0.12,
            }
        );
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let params = PricingParameters::default();
        let tax_only = RegionalOverride {
            tax_percent: Some(0.07),
            ..Default::default()
        };

        let resolved = resolve(&params, Some(&tax_only), None, None);
        let baseline = resolve(&params, None, None, None);

        assert_eq!(resolved.tax_percent, 0.07);
        assert_eq!(
            ResolvedParameters {
                tax_percent: baseline.tax_percent,
                ..resolved
            },
            baseline
        );
    }

    #[test]
    fn regional_cargo_risk_is_flat() {
        let params = PricingParameters::default();
        let regional = RegionalOverride {
            cargo_risk_percent: Some(0.004),
            ..Default::default()
        };
        let resolved = resolve(&params, Some(&regional), None, None);
        assert_eq!(resolved.cargo_risk, CargoRiskRate::Flat(0.004));
        assert_eq!(resolved.cargo_risk.for_value(500.0), 0.004);
        assert_eq!(resolved.cargo_risk.for_value(50_000.0), 0.004);
    }

    #[test]
    fn insurance_precedence() {
        let params = PricingParameters::default();
        let regional = RegionalOverride {
            insurance_percent: Some(0.00316),
            ..Default::default()
        };

        assert_eq!(resolve(&params, None, None, Some(0.002)).insurance_percent, 0.002);
        assert_eq!(
            resolve(&params, Some(&regional), None, Some(0.002)).insurance_percent,
            0.00316
        );
        assert_eq!(
            resolve(&params, Some(&regional), Some(&corridor(Some(0.001))), Some(0.002))
                .insurance_percent,
            0.001
        );
        assert_eq!(
            resolve(&params, Some(&regional), Some(&corridor(None)), None).insurance_percent,
            0.00316
        );
    }

    #[test]
    fn cargo_risk_threshold_is_inclusive() {
        let rate = CargoRiskRate::Tiered {
            up_to_threshold: 0.001,
            above_threshold: 0.0023,
        };
        assert_eq!(rate.for_value(10_000.0), 0.001);
        assert_eq!(rate.for_value(10_000.01), 0.0023);
    }
}
