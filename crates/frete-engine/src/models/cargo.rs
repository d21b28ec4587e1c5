use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PricingError, Result},
    utils::unit::{LengthUnit, MassUnit},
};

/// Physical cargo as measured by the shipper.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CargoSpec {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub real_weight: f64,
    #[serde(default)]
    pub length_unit: LengthUnit,
    #[serde(default)]
    pub mass_unit: MassUnit,
}

impl CargoSpec {
    /// Cargo in centimetres and kilograms.
    pub fn new(width_cm: f64, height_cm: f64, depth_cm: f64, real_weight_kg: f64) -> Self {
        Self {
            width: width_cm,
            height: height_cm,
            depth: depth_cm,
            real_weight: real_weight_kg,
            length_unit: LengthUnit::Cm,
            mass_unit: MassUnit::Kg,
        }
    }

    pub fn with_units(mut self, length_unit: LengthUnit, mass_unit: MassUnit) -> Self {
        self.length_unit = length_unit;
        self.mass_unit = mass_unit;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("real weight", self.real_weight),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(PricingError::InvalidCargoSpec(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Validates and converts to centimetres and kilograms.
    pub fn normalized(&self) -> Result<Self> {
        self.validate()?;

        Ok(Self::new(
            self.length_unit.amount_in_centimeters(self.width)?,
            self.length_unit.amount_in_centimeters(self.height)?,
            self.length_unit.amount_in_centimeters(self.depth)?,
            self.mass_unit.amount_in_kilograms(self.real_weight)?,
        ))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricingRequest {
    pub cargo: CargoSpec,
    pub declared_value: f64,
    /// Tariff category key, `{UF}_{CATEGORY}`.
    pub category: String,
    /// Corridor code the caller asked for. `compute` prices the resolved
    /// `RouteCorridor` it is handed and records its code on the breakdown.
    pub corridor: Option<String>,
    pub insurance_percent: Option<f64>,
    /// Packaging or goods value added on top of the freight total.
    pub secondary_value: Option<f64>,
    /// Instant against which special surcharge validity is judged.
    pub as_of: DateTime<Utc>,
}

impl PricingRequest {
    pub fn new(cargo: CargoSpec, declared_value: f64, category: impl Into<String>) -> Self {
        Self {
            cargo,
            declared_value,
            category: category.into(),
            corridor: None,
            insurance_percent: None,
            secondary_value: None,
            as_of: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.cargo.validate()?;

        if !self.declared_value.is_finite() || self.declared_value < 0.0 {
            return Err(PricingError::InvalidCargoSpec(format!(
                "declared value must be zero or positive, got {}",
                self.declared_value
            )));
        }

        Ok(())
    }
}
