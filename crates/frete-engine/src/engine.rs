use crate::{
    corridor,
    error::Result,
    models::{
        breakdown::{BreakdownCargo, PricingBreakdown},
        cargo::PricingRequest,
        surcharge::SpecialSurcharge,
        tariff::{PricingParameters, RateTable, RegionalOverride, RouteCorridor},
    },
    regional,
    special::{self, ConsolidatedSurcharges},
    standard,
    utils::price::round_cents,
    weight,
};

/// Prices one shipment from fully resolved inputs.
///
/// Pure: no I/O, no shared state, and identical inputs give identical
/// breakdowns. Special surcharge records are filtered against
/// `request.as_of` and consolidated before they are applied.
pub fn compute(
    request: &PricingRequest,
    tariff: &RateTable,
    parameters: &PricingParameters,
    regional_override: Option<&RegionalOverride>,
    route: Option<&RouteCorridor>,
    special_surcharges: &[SpecialSurcharge],
) -> Result<PricingBreakdown> {
    let mut breakdown = compute_standard(request, tariff, parameters, regional_override, route)?;
    let consolidated = special::consolidate(special_surcharges, request.as_of);
    apply_special_surcharges(&mut breakdown, &consolidated);
    Ok(breakdown)
}

/// Freight, toll, insurance, cargo risk and tax, without special surcharges.
pub fn compute_standard(
    request: &PricingRequest,
    tariff: &RateTable,
    parameters: &PricingParameters,
    regional_override: Option<&RegionalOverride>,
    route: Option<&RouteCorridor>,
) -> Result<PricingBreakdown> {
    request.validate()?;
    let cargo = request.cargo.normalized()?;

    let params = regional::resolve(
        parameters,
        regional_override,
        route,
        request.insurance_percent,
    );

    let assessed = weight::assess(&cargo, params.volumetric_divisor)?;
    let amount = corridor::adjust(tariff.amount_for(assessed.taxable), route);
    let charges = standard::calculate(
        &params,
        request.declared_value,
        corridor::toll_units(route),
    );

    let mut breakdown = PricingBreakdown {
        category: request.category.clone(),
        corridor: route.map(|r| r.code.clone()),
        cargo: BreakdownCargo {
            width_cm: cargo.width,
            height_cm: cargo.height,
            depth_cm: cargo.depth,
            real_weight_kg: cargo.real_weight,
        },
        declared_value: request.declared_value,
        volumetric_weight: round_cents(assessed.volumetric),
        taxable_weight: assessed.taxable,
        overage_weight: amount.overage_weight,
        base_amount: amount.base,
        overage_amount: amount.overage,
        toll_units: charges.toll_units,
        toll: charges.toll,
        insurance_percent: params.insurance_percent,
        insurance_fee: charges.insurance_fee,
        cargo_risk_percent: charges.cargo_risk_percent,
        cargo_risk_fee: charges.cargo_risk_fee,
        subtotal: 0.0,
        tax_percent: params.tax_percent,
        tax: 0.0,
        special_surcharges: Vec::new(),
        surcharge_description: None,
        surcharge_justification: None,
        total: 0.0,
        secondary_value: request.secondary_value,
        grand_total: 0.0,
    };
    // Subtotal, tax and totals are derived from the components above.
    breakdown.recompute();

    Ok(breakdown)
}

/// Replaces the special surcharge lines of `breakdown` and recomputes its
/// totals. Applying the same surcharges again yields the same breakdown.
pub fn apply_special_surcharges(
    breakdown: &mut PricingBreakdown,
    surcharges: &ConsolidatedSurcharges,
) {
    breakdown.special_surcharges = special::apply(
        surcharges,
        breakdown.declared_value,
        breakdown.standard_total(),
    );
    breakdown.surcharge_description = surcharges.description.clone();
    breakdown.surcharge_justification = surcharges.justification.clone();
    breakdown.recompute();
}
