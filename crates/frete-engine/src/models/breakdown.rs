use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use super::surcharge::{AmountKind, SurchargeKind};
use crate::{
    special,
    utils::price::{round_cents, sum_cents},
};

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BreakdownCargo {
    pub width_cm: f64,
    pub height_cm: f64,
    pub depth_cm: f64,
    pub real_weight_kg: f64,
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpecialSurchargeLine {
    pub kind: SurchargeKind,
    pub amount_kind: AmountKind,
    /// Stored value: currency for fixed lines, a fraction for percentage lines.
    pub rate: f64,
    pub amount: f64,
}

/// Itemized quote. Every monetary field is rounded to cents where it is
/// computed.
#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricingBreakdown {
    pub category: String,
    /// Corridor code the freight was adjusted for, if any.
    pub corridor: Option<String>,
    pub cargo: BreakdownCargo,
    pub declared_value: f64,
    pub volumetric_weight: f64,
    pub taxable_weight: u32,
    pub overage_weight: u32,
    pub base_amount: f64,
    pub overage_amount: f64,
    pub toll_units: u32,
    pub toll: f64,
    pub insurance_percent: f64,
    pub insurance_fee: f64,
    pub cargo_risk_percent: f64,
    pub cargo_risk_fee: f64,
    /// Standard components before tax.
    pub subtotal: f64,
    pub tax_percent: f64,
    pub tax: f64,
    pub special_surcharges: Vec<SpecialSurchargeLine>,
    pub surcharge_description: Option<String>,
    pub surcharge_justification: Option<String>,
    pub total: f64,
    pub secondary_value: Option<f64>,
    pub grand_total: f64,
}

impl PricingBreakdown {
    /// Standard components plus tax; special surcharges are not taxed.
    pub fn standard_total(&self) -> f64 {
        sum_cents([self.subtotal, self.tax])
    }

    pub fn surcharge(&self, kind: SurchargeKind) -> f64 {
        self.special_surcharges
            .iter()
            .filter(|line| line.kind == kind)
            .map(|line| line.amount)
            .sum()
    }

    /// Re-derives `subtotal`, `tax`, the special surcharge amounts, `total`
    /// and `grand_total` from the stored components and rates. Pure over
    /// the current fields, so it may be called any number of times.
    pub fn recompute(&mut self) {
        self.subtotal = sum_cents([
            self.base_amount,
            self.overage_amount,
            self.toll,
            self.insurance_fee,
            self.cargo_risk_fee,
        ]);
        self.tax = round_cents(self.subtotal * self.tax_percent);

        let standard_total = self.standard_total();
        special::price_lines(
            &mut self.special_surcharges,
            self.declared_value,
            standard_total,
        );

        self.total = sum_cents(
            std::iter::once(standard_total)
                .chain(self.special_surcharges.iter().map(|line| line.amount)),
        );
        self.grand_total = match self.secondary_value {
            Some(value) => round_cents(self.total + value),
            None => self.total,
        };
    }
}
