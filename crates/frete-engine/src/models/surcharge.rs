use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use typeshare::typeshare;

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeKind {
    AccessDifficulty,
    TransitRestriction,
}

impl fmt::Display for SurchargeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SurchargeKind::AccessDifficulty => "access difficulty",
            SurchargeKind::TransitRestriction => "transit restriction",
        };
        write!(f, "{label}")
    }
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmountKind {
    #[default]
    Fixed,
    Percentage,
}

/// A destination-specific surcharge record as stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpecialSurcharge {
    pub kind: SurchargeKind,
    pub amount: Option<f64>,
    pub amount_kind: Option<AmountKind>,
    pub valid_until: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub justification: Option<String>,
}

impl SpecialSurcharge {
    pub fn fixed(kind: SurchargeKind, amount: f64) -> Self {
        Self {
            kind,
            amount: Some(amount),
            amount_kind: Some(AmountKind::Fixed),
            valid_until: None,
            description: None,
            justification: None,
        }
    }

    pub fn percentage(kind: SurchargeKind, rate: f64) -> Self {
        Self {
            amount_kind: Some(AmountKind::Percentage),
            ..Self::fixed(kind, rate)
        }
    }

    pub fn is_active(&self, as_of: DateTime<Utc>) -> bool {
        self.valid_until.is_none_or(|until| until > as_of)
    }
}

/// Consolidated rate for one surcharge kind.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SurchargeRate {
    pub amount: f64,
    pub amount_kind: AmountKind,
}
