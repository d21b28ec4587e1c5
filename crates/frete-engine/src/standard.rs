use serde::{Deserialize, Serialize};

use crate::{
    regional::ResolvedParameters,
    utils::price::{percent_with_floor, round_cents},
};

/// Toll, insurance and cargo-risk charges, each rounded to cents.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct StandardSurcharges {
    pub toll_units: u32,
    pub toll: f64,
    pub insurance_fee: f64,
    pub cargo_risk_percent: f64,
    pub cargo_risk_fee: f64,
}

/// Flat per-shipment toll; it does not scale with weight.
pub fn toll(params: &ResolvedParameters, units: u32) -> f64 {
    round_cents(params.toll_unit * units as f64)
}

pub fn insurance_fee(params: &ResolvedParameters, declared_value: f64) -> f64 {
    percent_with_floor(declared_value, params.insurance_percent, params.insurance_min)
}

pub fn cargo_risk_fee(params: &ResolvedParameters, declared_value: f64) -> (f64, f64) {
    let rate = params.cargo_risk.for_value(declared_value);
    (
        rate,
        percent_with_floor(declared_value, rate, params.cargo_risk_min),
    )
}

pub fn calculate(
    params: &ResolvedParameters,
    declared_value: f64,
    toll_units: u32,
) -> StandardSurcharges {
    let (cargo_risk_percent, cargo_risk_fee) = cargo_risk_fee(params, declared_value);

    StandardSurcharges {
        toll_units,
        toll: toll(params, toll_units),
        insurance_fee: insurance_fee(params, declared_value),
        cargo_risk_percent,
        cargo_risk_fee,
    }
}
