use serde::{Deserialize, Serialize};

use crate::{
    error::{PricingError, Result},
    models::cargo::CargoSpec,
};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct WeightAssessment {
    pub volumetric: f64,
    pub taxable: u32,
}

/// Weight equivalent of the cargo volume. Dimensions in centimetres,
/// `divisor` in kilograms per cubic metre.
pub fn volumetric_weight(cargo: &CargoSpec, divisor: f64) -> f64 {
    let cubic_meters = (cargo.width / 100.0) * (cargo.height / 100.0) * (cargo.depth / 100.0);
    cubic_meters * divisor
}

/// Taxable weight is the greater of real and volumetric weight, rounded up
/// to a whole kilogram. Expects normalized, validated cargo; a taxable
/// weight beyond `u32::MAX` kilograms is rejected.
pub fn assess(cargo: &CargoSpec, divisor: f64) -> Result<WeightAssessment> {
    let volumetric = volumetric_weight(cargo, divisor);
    let taxable = volumetric.max(cargo.real_weight).ceil();

    if taxable > f64::from(u32::MAX) {
        return Err(PricingError::InvalidCargoSpec(format!(
            "taxable weight {taxable} kg exceeds {} kg",
            u32::MAX
        )));
    }

    Ok(WeightAssessment {
        volumetric,
        taxable: taxable as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn one_cubic_meter_at_300() {
        let cargo = CargoSpec::new(100.0, 100.0, 100.0, 50.0);
        assert_eq!(
            assess(&cargo, 300.0),
            Ok(WeightAssessment {
                volumetric: 300.0,
                taxable: 300,
            })
        );
    }

    #[rstest]
    #[case::dense_cargo(CargoSpec::new(10.0, 10.0, 10.0, 12.2), 13)]
    #[case::exact_kilogram(CargoSpec::new(10.0, 10.0, 10.0, 7.0), 7)]
    #[case::bulky_cargo(CargoSpec::new(45.0, 45.0, 45.0, 4.0), 28)]
    #[case::tiny_parcel(CargoSpec::new(1.0, 1.0, 1.0, 0.1), 1)]
    fn taxable_weight_rounds_up_the_greater_weight(#[case] cargo: CargoSpec, #[case] expected: u32) {
        assert_eq!(assess(&cargo, 300.0).unwrap().taxable, expected);
    }

    #[test]
    fn oversized_cargo_is_rejected() {
        let cargo = CargoSpec::new(100_000.0, 100_000.0, 100_000.0, 1.0);
        assert!(matches!(
            assess(&cargo, 300.0),
            Err(PricingError::InvalidCargoSpec(_))
        ));
    }
}
