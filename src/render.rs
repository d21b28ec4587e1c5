use frete_engine::{
    lookup::Quote,
    models::surcharge::{AmountKind, SurchargeKind},
};

use crate::handlers::{destinations::DestinationSummary, tariff::TariffReport};

fn line(out: &mut String, label: &str, amount: f64) {
    out.push_str(&format!("  {label:<28}{amount:>12.2}\n"));
}

fn percent(rate: f64) -> String {
    format!("{:.3}%", rate * 100.0)
}

pub fn render_quote(quote: &Quote) -> String {
    let b = &quote.breakdown;
    let mut out = String::new();

    out.push_str(&format!(
        "{} / {} ({}), tariff version {} [{}]\n",
        quote.destination.city,
        quote.destination.state,
        b.category,
        quote.version,
        quote.tariff_origin
    ));
    out.push_str(&format!(
        "Cargo {}x{}x{} cm, {} kg real, {:.2} kg volumetric, {} kg taxable\n",
        b.cargo.width_cm,
        b.cargo.height_cm,
        b.cargo.depth_cm,
        b.cargo.real_weight_kg,
        b.volumetric_weight,
        b.taxable_weight
    ));
    if let Some(corridor) = &b.corridor {
        out.push_str(&format!("Corridor {corridor}\n"));
    }
    if let Some(delivery) = &quote.delivery {
        out.push_str(&format!("Delivery {delivery}\n"));
    }
    out.push('\n');

    line(&mut out, "Base (band)", b.base_amount);
    if b.overage_weight > 0 {
        line(
            &mut out,
            &format!("Overage ({} kg)", b.overage_weight),
            b.overage_amount,
        );
    }
    line(&mut out, &format!("Toll (x{})", b.toll_units), b.toll);
    line(
        &mut out,
        &format!("Insurance ({})", percent(b.insurance_percent)),
        b.insurance_fee,
    );
    line(
        &mut out,
        &format!("Cargo risk ({})", percent(b.cargo_risk_percent)),
        b.cargo_risk_fee,
    );
    line(
        &mut out,
        &format!("Tax ({})", percent(b.tax_percent)),
        b.tax,
    );

    for surcharge in &b.special_surcharges {
        let name = match surcharge.kind {
            SurchargeKind::AccessDifficulty => "Access difficulty",
            SurchargeKind::TransitRestriction => "Transit restriction",
        };
        let basis = match surcharge.amount_kind {
            AmountKind::Fixed => "fixed".to_string(),
            AmountKind::Percentage => percent(surcharge.rate),
        };
        line(&mut out, &format!("{name} ({basis})"), surcharge.amount);
    }

    out.push('\n');
    line(&mut out, "Total", b.total);
    if let Some(value) = b.secondary_value {
        line(&mut out, "Packaging value", value);
        line(&mut out, "Grand total", b.grand_total);
    }

    if let Some(justification) = &b.surcharge_justification {
        out.push_str(&format!("\nSurcharge justification: {justification}\n"));
    }

    out
}

pub fn render_destinations(summaries: &[DestinationSummary]) -> String {
    let mut out = String::new();

    for summary in summaries {
        out.push_str(&format!(
            "{:<16} {:<28} {:<3} {:<16}",
            summary.id, summary.city, summary.state, summary.category
        ));
        for kind in [SurchargeKind::AccessDifficulty, SurchargeKind::TransitRestriction] {
            if let Some(rate) = summary.surcharges.rate(kind) {
                let amount = match rate.amount_kind {
                    AmountKind::Fixed => format!("{:.2}", rate.amount),
                    AmountKind::Percentage => percent(rate.amount),
                };
                out.push_str(&format!(" {kind}: {amount}"));
            }
        }
        if let Some(justification) = &summary.surcharges.justification {
            out.push_str(&format!(" ({justification})"));
        }
        out.push('\n');
    }

    out
}

pub fn render_tariff(report: &TariffReport) -> String {
    let table = &report.tariff.table;
    let mut out = String::new();

    out.push_str(&format!(
        "{} in version {} [{}]\n",
        report.category, report.version, report.tariff.origin
    ));
    line(&mut out, "up to 10 kg", table.up_to_10);
    line(&mut out, "up to 20 kg", table.up_to_20);
    line(&mut out, "up to 40 kg", table.up_to_40);
    line(&mut out, "up to 60 kg", table.up_to_60);
    line(&mut out, "up to 100 kg", table.up_to_100);
    line(&mut out, "per kg above 100", table.overage_per_kg);

    if let Some(regional) = &report.regional {
        let overrides = [
            ("cargo risk", regional.cargo_risk_percent),
            ("tax", regional.tax_percent),
            ("insurance", regional.insurance_percent),
        ];
        for (name, rate) in overrides {
            if let Some(rate) = rate {
                out.push_str(&format!("  regional {name}: {}\n", percent(rate)));
            }
        }
    }

    out
}
