use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    G,
    #[default]
    Kg,
    Oz,
    Lb,
}

impl MassUnit {
    pub fn to_kilograms(&self) -> f64 {
        match self {
            MassUnit::G => 0.001,
            MassUnit::Kg => 1.0,
            MassUnit::Oz => 0.028_349_5,
            MassUnit::Lb => 0.453_592,
        }
    }

    pub fn amount_in_kilograms(&self, amount: f64) -> Result<f64, UnitError> {
        if !amount.is_finite() {
            return Err(UnitError::InvalidAmount(amount));
        }

        Ok(amount * self.to_kilograms())
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit_str = match self {
            MassUnit::G => "g",
            MassUnit::Kg => "kg",
            MassUnit::Oz => "oz",
            MassUnit::Lb => "lb",
        };
        write!(f, "{unit_str}")
    }
}

impl FromStr for MassUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "g" => Ok(MassUnit::G),
            "kg" => Ok(MassUnit::Kg),
            "oz" => Ok(MassUnit::Oz),
            "lb" => Ok(MassUnit::Lb),
            _ => Err(UnitError::InvalidUnit(s.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Cm,
    M,
    In,
}

impl LengthUnit {
    pub fn to_centimeters(&self) -> f64 {
        match self {
            LengthUnit::Cm => 1.0,
            LengthUnit::M => 100.0,
            LengthUnit::In => 2.54,
        }
    }

    pub fn amount_in_centimeters(&self, amount: f64) -> Result<f64, UnitError> {
        if !amount.is_finite() {
            return Err(UnitError::InvalidAmount(amount));
        }

        Ok(amount * self.to_centimeters())
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit_str = match self {
            LengthUnit::Cm => "cm",
            LengthUnit::M => "m",
            LengthUnit::In => "in",
        };
        write!(f, "{unit_str}")
    }
}

impl FromStr for LengthUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" => Ok(LengthUnit::Cm),
            "m" => Ok(LengthUnit::M),
            "in" => Ok(LengthUnit::In),
            _ => Err(UnitError::InvalidUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units_case_insensitively() {
        assert_eq!("KG".parse::<MassUnit>(), Ok(MassUnit::Kg));
        assert_eq!("In".parse::<LengthUnit>(), Ok(LengthUnit::In));
        assert_eq!(
            "stone".parse::<MassUnit>(),
            Err(UnitError::InvalidUnit("stone".into()))
        );
    }

    #[test]
    fn converts_to_base_units() {
        assert_eq!(LengthUnit::M.amount_in_centimeters(1.5), Ok(150.0));
        assert_eq!(MassUnit::G.amount_in_kilograms(2500.0), Ok(2.5));
        assert_eq!(MassUnit::Lb.amount_in_kilograms(1.0), Ok(0.453_592));
    }

    #[test]
    fn rejects_non_finite_amounts() {
        assert!(matches!(
            MassUnit::Kg.amount_in_kilograms(f64::NAN),
            Err(UnitError::InvalidAmount(_))
        ));
        assert_eq!(
            LengthUnit::Cm.amount_in_centimeters(f64::INFINITY),
            Err(UnitError::InvalidAmount(f64::INFINITY))
        );
    }
}
