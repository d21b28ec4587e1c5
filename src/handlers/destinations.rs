use chrono::{DateTime, Utc};
use frete_engine::{
    lookup::PricingSource,
    models::destination::{DeliveryWindow, Destination},
    special::{self, ConsolidatedSurcharges},
};
use serde::Serialize;

use crate::book::TariffBook;

pub const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct DestinationFilter {
    pub state: Option<String>,
    pub with_surcharges: bool,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DestinationSummary {
    pub id: String,
    pub city: String,
    pub state: String,
    pub category: String,
    pub delivery: Option<DeliveryWindow>,
    pub surcharges: ConsolidatedSurcharges,
}

impl DestinationSummary {
    fn new(destination: &Destination, surcharges: ConsolidatedSurcharges) -> Self {
        Self {
            id: destination.id.clone(),
            city: destination.city.clone(),
            state: destination.state.clone(),
            category: destination.category_code(),
            delivery: destination.delivery_window(),
            surcharges,
        }
    }
}

pub fn handle_destinations(
    book: &TariffBook,
    filter: &DestinationFilter,
    as_of: DateTime<Utc>,
) -> Vec<DestinationSummary> {
    book.destinations
        .iter()
        .filter(|d| {
            filter
                .state
                .as_deref()
                .is_none_or(|state| d.state.eq_ignore_ascii_case(state))
        })
        .map(|d| {
            let records = book.resolve_special_surcharges(&d.id);
            DestinationSummary::new(d, special::consolidate(&records, as_of))
        })
        .filter(|summary| !filter.with_surcharges || !summary.surcharges.is_empty())
        .take(filter.limit.unwrap_or(DEFAULT_LIMIT))
        .collect()
}
