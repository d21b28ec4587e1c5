use crate::{
    models::tariff::RouteCorridor, tariff::TariffAmount, utils::price::round_cents,
};

/// Toll units charged when no corridor says otherwise.
pub const DEFAULT_TOLL_UNITS: u32 = 1;

/// Multiplies band and overage by the corridor factor, rounding each after
/// the multiplication. Without a corridor the factor is 1.
pub fn adjust(amount: TariffAmount, corridor: Option<&RouteCorridor>) -> TariffAmount {
    let factor = corridor.map_or(1.0, |c| c.factor);

    TariffAmount {
        base: round_cents(amount.base * factor),
        overage: round_cents(amount.overage * factor),
        overage_weight: amount.overage_weight,
    }
}

pub fn toll_units(corridor: Option<&RouteCorridor>) -> u32 {
    corridor
        .and_then(|c| c.toll_points)
        .unwrap_or(DEFAULT_TOLL_UNITS)
}
