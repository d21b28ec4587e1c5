//! Quotes priced from tariff books on disk.

use std::{io::Write, path::PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use frete::{
    book::{BookError, TariffBook},
    handlers::{
        destinations::{DestinationFilter, handle_destinations},
        quote::{QuoteError, QuoteInput, handle_quote},
        tariff::handle_tariff,
    },
    render,
};
use frete_engine::{PricingError, lookup::TariffOrigin, models::surcharge::SurchargeKind};
use pretty_assertions::assert_eq;

fn sample_book() -> TariffBook {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tariffs.toml");
    TariffBook::load(&path).unwrap()
}

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 14, 0, 0).unwrap()
}

fn small_box(destination: &str) -> QuoteInput {
    QuoteInput {
        destination: destination.into(),
        dims: Some("30x30x30".into()),
        weight: Some(10.0),
        value: Some(2_000.0),
        ..Default::default()
    }
}

fn write_book(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn product_quote_adds_packaging_value() {
    let input = QuoteInput {
        destination: "sao-paulo".into(),
        product: Some("zilla".into()),
        ..Default::default()
    };
    let quote = handle_quote(&sample_book(), &input, as_of()).unwrap();
    let b = &quote.breakdown;

    assert_eq!(quote.tariff_origin, TariffOrigin::Complete);
    assert_eq!(b.taxable_weight, 555);
    assert_eq!(b.base_amount, 120.0);
    assert_eq!(b.overage_amount, 546.0);
    assert_eq!(b.insurance_fee, 40.5);
    assert_eq!(b.cargo_risk_fee, 8.1);
    assert_eq!(b.subtotal, 718.4);
    assert_eq!(b.tax, 86.21);
    assert_eq!(b.total, 804.61);
    assert_eq!(b.secondary_value, Some(8_100.0));
    assert_eq!(b.grand_total, 8_904.61);
}

#[test]
fn regional_rates_and_surcharges_apply_to_belem() {
    let quote = handle_quote(&sample_book(), &small_box("belem"), as_of()).unwrap();
    let b = &quote.breakdown;

    assert_eq!(b.category, "PA_CAPITAL");
    assert_eq!(b.base_amount, 48.0);
    assert_eq!(b.insurance_percent, 0.004);
    assert_eq!(b.insurance_fee, 8.0);
    assert_eq!(b.cargo_risk_percent, 0.004);
    assert_eq!(b.cargo_risk_fee, 8.0);
    assert_eq!(b.tax, 8.14);
    assert_eq!(b.standard_total(), 75.94);
    assert_eq!(b.surcharge(SurchargeKind::AccessDifficulty), 35.0);
    assert_eq!(b.surcharge(SurchargeKind::TransitRestriction), 2.22);
    assert_eq!(b.total, 113.16);
    assert_eq!(b.grand_total, 113.16);
    assert_eq!(
        b.surcharge_justification.as_deref(),
        Some("Restrição municipal de circulação")
    );
    assert_eq!(
        quote.delivery.map(|d| d.to_string()).as_deref(),
        Some("8 to 12 days (river)")
    );

    let text = render::render_quote(&quote);
    assert!(text.contains("Access difficulty (fixed)"));
    assert!(text.contains("Transit restriction (2.000%)"));
}

#[test]
fn corridor_applies_by_code() {
    let input = QuoteInput {
        corridor: Some("SP-INT".into()),
        ..small_box("campinas")
    };
    let quote = handle_quote(&sample_book(), &input, as_of()).unwrap();
    assert!(render::render_quote(&quote).contains("Corridor SP-INT"));
    let b = quote.breakdown;

    assert_eq!(b.corridor.as_deref(), Some("SP-INT"));
    assert_eq!(b.base_amount, 32.4);
    assert_eq!(b.toll_units, 3);
    assert_eq!(b.toll, 11.4);
    assert_eq!(b.subtotal, 55.8);
    assert_eq!(b.tax, 6.7);
    assert_eq!(b.total, 62.5);
}

#[test]
fn legacy_table_backs_up_missing_complete_table() {
    let quote = handle_quote(&sample_book(), &small_box("rio-de-janeiro"), as_of()).unwrap();
    assert_eq!(quote.tariff_origin, TariffOrigin::Legacy);
    assert_eq!(quote.breakdown.base_amount, 40.0);
    assert_eq!(quote.delivery, None);

    let report = handle_tariff(&sample_book(), "RJ_CAPITAL", None).unwrap();
    assert_eq!(report.version, "2025-01");
    assert_eq!(report.tariff.origin, TariffOrigin::Legacy);
    assert_eq!(report.regional, None);
}

#[test]
fn quote_errors_are_typed() {
    let book = sample_book();

    let err = handle_quote(&book, &small_box("manaus"), as_of()).unwrap_err();
    assert!(matches!(
        err,
        QuoteError::Pricing(PricingError::DestinationNotFound(_))
    ));

    let input = QuoteInput {
        dims: None,
        ..small_box("sao-paulo")
    };
    assert!(matches!(
        handle_quote(&book, &input, as_of()),
        Err(QuoteError::MissingCargo)
    ));

    let input = QuoteInput {
        product: Some("sofa".into()),
        ..small_box("sao-paulo")
    };
    assert!(matches!(
        handle_quote(&book, &input, as_of()),
        Err(QuoteError::UnknownProduct(_))
    ));

    let input = QuoteInput {
        weight: Some(0.0),
        ..small_box("sao-paulo")
    };
    assert!(matches!(
        handle_quote(&book, &input, as_of()),
        Err(QuoteError::Pricing(PricingError::InvalidCargoSpec(_)))
    ));

    assert!(matches!(
        handle_tariff(&book, "XX_NOWHERE", None),
        Err(PricingError::TariffNotFound { .. })
    ));
}

#[test]
fn lists_destinations_with_surcharges() {
    let book = sample_book();

    let all = handle_destinations(&book, &DestinationFilter::default(), as_of());
    assert_eq!(all.len(), 4);

    let sp = DestinationFilter {
        state: Some("sp".into()),
        ..Default::default()
    };
    let ids: Vec<_> = handle_destinations(&book, &sp, as_of())
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec!["sao-paulo", "campinas"]);

    let surcharged = DestinationFilter {
        with_surcharges: true,
        ..Default::default()
    };
    let listed = handle_destinations(&book, &surcharged, as_of());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "belem");
    let text = render::render_destinations(&listed);
    assert!(text.contains("access difficulty: 35.00"));
    assert!(text.contains("transit restriction: 2.000%"));

    let limited = DestinationFilter {
        limit: Some(2),
        ..Default::default()
    };
    assert_eq!(handle_destinations(&book, &limited, as_of()).len(), 2);
}

#[test]
fn expired_surcharges_do_not_list() {
    let file = write_book(
        r#"
[[destinations]]
id = "ilhabela"
city = "Ilhabela"
state = "SP"
category = "INTERIOR_2"

[[surcharges]]
destination_id = "ilhabela"
kind = "access_difficulty"
amount = 22.0
valid_until = "2025-01-01T00:00:00Z"
"#,
    );
    let book = TariffBook::load(file.path()).unwrap();
    let filter = DestinationFilter {
        with_surcharges: true,
        ..Default::default()
    };
    assert!(handle_destinations(&book, &filter, as_of()).is_empty());
}

#[test]
fn rejects_decreasing_tariff() {
    let file = write_book(
        r#"
[[versions]]
id = "bad"

[versions.parameters]
volumetric_divisor = 300.0
insurance_percent = 0.005
insurance_min = 4.78
cargo_risk_percent_up_to_10k = 0.001
cargo_risk_percent_above_10k = 0.0023
cargo_risk_min = 1.10
toll_unit = 3.80
tax_percent = 0.12

[[versions.tariffs]]
category = "SP_CAPITAL"
up_to_10 = 25.0
up_to_20 = 35.0
up_to_40 = 30.0
up_to_60 = 75.0
up_to_100 = 120.0
overage_per_kg = 1.2
"#,
    );
    assert!(matches!(
        TariffBook::load(file.path()),
        Err(BookError::NonMonotonicTariff { .. })
    ));
}

#[test]
fn rejects_unknown_active_version() {
    let file = write_book("active_version = \"2030-01\"\n");
    assert!(matches!(
        TariffBook::load(file.path()),
        Err(BookError::UnknownActiveVersion(_))
    ));
}
