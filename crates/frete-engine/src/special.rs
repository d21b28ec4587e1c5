use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        breakdown::SpecialSurchargeLine,
        surcharge::{AmountKind, SpecialSurcharge, SurchargeKind, SurchargeRate},
    },
    utils::price::{round_cents, sum_cents},
};

/// Active surcharges of one destination, merged into one rate per kind.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ConsolidatedSurcharges {
    pub access_difficulty: Option<SurchargeRate>,
    pub transit_restriction: Option<SurchargeRate>,
    pub description: Option<String>,
    pub justification: Option<String>,
}

impl ConsolidatedSurcharges {
    pub fn is_empty(&self) -> bool {
        self.access_difficulty.is_none() && self.transit_restriction.is_none()
    }

    pub fn rate(&self, kind: SurchargeKind) -> Option<SurchargeRate> {
        match kind {
            SurchargeKind::AccessDifficulty => self.access_difficulty,
            SurchargeKind::TransitRestriction => self.transit_restriction,
        }
    }
}

/// Merges records active at `as_of` in the order given. The latest
/// non-zero amount of each kind wins, as do the latest description and
/// justification.
pub fn consolidate(records: &[SpecialSurcharge], as_of: DateTime<Utc>) -> ConsolidatedSurcharges {
    let mut merged = ConsolidatedSurcharges::default();

    for record in records.iter().filter(|r| r.is_active(as_of)) {
        if let Some(amount) = record.amount.filter(|a| *a != 0.0) {
            let rate = SurchargeRate {
                amount,
                amount_kind: record.amount_kind.unwrap_or_default(),
            };
            match record.kind {
                SurchargeKind::AccessDifficulty => merged.access_difficulty = Some(rate),
                SurchargeKind::TransitRestriction => merged.transit_restriction = Some(rate),
            }
        }

        if let Some(description) = record.description.as_ref().filter(|d| !d.is_empty()) {
            merged.description = Some(description.clone());
        }

        if let Some(justification) = record.justification.as_ref().filter(|j| !j.is_empty()) {
            merged.justification = Some(justification.clone());
        }
    }

    merged
}

/// Prices the consolidated surcharges. Access difficulty is charged first;
/// a percentage transit restriction is levied on `running_total` plus the
/// access-difficulty amount.
pub fn apply(
    surcharges: &ConsolidatedSurcharges,
    declared_value: f64,
    running_total: f64,
) -> Vec<SpecialSurchargeLine> {
    let mut lines: Vec<_> = [SurchargeKind::AccessDifficulty, SurchargeKind::TransitRestriction]
        .into_iter()
        .filter_map(|kind| {
            surcharges.rate(kind).map(|rate| SpecialSurchargeLine {
                kind,
                amount_kind: rate.amount_kind,
                rate: rate.amount,
                amount: 0.0,
            })
        })
        .collect();

    price_lines(&mut lines, declared_value, running_total);
    lines
}

/// Sets the amount of each line from its stored rate. Fixed lines charge
/// the rate itself, percentage access difficulty is on `declared_value`,
/// and percentage transit restriction is on `standard_total` plus the
/// access-difficulty amounts priced before it.
pub fn price_lines(lines: &mut [SpecialSurchargeLine], declared_value: f64, standard_total: f64) {
    let mut access_amount = 0.0;

    for line in lines.iter_mut() {
        line.amount = match (line.kind, line.amount_kind) {
            (_, AmountKind::Fixed) => round_cents(line.rate),
            (SurchargeKind::AccessDifficulty, AmountKind::Percentage) => {
                round_cents(declared_value * line.rate)
            }
            (SurchargeKind::TransitRestriction, AmountKind::Percentage) => {
                round_cents(sum_cents([standard_total, access_amount]) * line.rate)
            }
        };

        if line.kind == SurchargeKind::AccessDifficulty {
            access_amount = sum_cents([access_amount, line.amount]);
        }
    }
}
