use serde::{Deserialize, Serialize};
use std::fmt;
use typeshare::typeshare;

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Road,
    River,
    Air,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self {
            TransportMode::Road => "road",
            TransportMode::River => "river",
            TransportMode::Air => "air",
        };
        write!(f, "{mode}")
    }
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    pub min_days: u32,
    pub max_days: u32,
    pub transport: TransportMode,
}

impl fmt::Display for DeliveryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_days == self.max_days {
            write!(f, "{} days ({})", self.min_days, self.transport)
        } else {
            write!(
                f,
                "{} to {} days ({})",
                self.min_days, self.max_days, self.transport
            )
        }
    }
}

/// A served city and the tariff category it is priced under.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Destination {
    pub id: String,
    pub city: String,
    /// Two-letter state code.
    pub state: String,
    /// Tier within the state, e.g. `CAPITAL` or `INTERIOR_1`.
    pub category: String,
    #[serde(default)]
    pub consumer_min_days: Option<u32>,
    #[serde(default)]
    pub consumer_max_days: Option<u32>,
    #[serde(default)]
    pub delivery_days: Option<u32>,
    #[serde(default)]
    pub transport: Option<TransportMode>,
}

impl Destination {
    pub fn category_code(&self) -> String {
        format!("{}_{}", self.state, self.category)
    }

    /// Consumer delivery window, falling back to the single legacy delivery
    /// time by road.
    pub fn delivery_window(&self) -> Option<DeliveryWindow> {
        match (self.consumer_min_days, self.consumer_max_days, self.delivery_days) {
            (Some(min_days), Some(max_days), _) => Some(DeliveryWindow {
                min_days,
                max_days,
                transport: self.transport.unwrap_or_default(),
            }),
            (_, _, Some(days)) => Some(DeliveryWindow {
                min_days: days,
                max_days: days,
                transport: TransportMode::Road,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destination() -> Destination {
        Destination {
            id: "belem".into(),
            city: "Belém".into(),
            state: "PA".into(),
            category: "CAPITAL".into(),
            consumer_min_days: None,
            consumer_max_days: None,
            delivery_days: None,
            transport: None,
        }
    }

    #[test]
    fn builds_category_code_from_state_and_tier() {
        assert_eq!(destination().category_code(), "PA_CAPITAL");
    }

    #[test]
    fn consumer_window_takes_precedence() {
        let dest = Destination {
            consumer_min_days: Some(8),
            consumer_max_days: Some(12),
            delivery_days: Some(5),
            transport: Some(TransportMode::River),
            ..destination()
        };
        let window = dest.delivery_window();
        assert_eq!(
            window,
            Some(DeliveryWindow {
                min_days: 8,
                max_days: 12,
                transport: TransportMode::River,
            })
        );
        assert_eq!(window.map(|w| w.to_string()).as_deref(), Some("8 to 12 days (river)"));
    }

    #[test]
    fn legacy_delivery_time_falls_back_to_road() {
        let dest = Destination {
            consumer_min_days: Some(3),
            delivery_days: Some(5),
            transport: Some(TransportMode::Air),
            ..destination()
        };
        assert_eq!(
            dest.delivery_window(),
            Some(DeliveryWindow {
                min_days: 5,
                max_days: 5,
                transport: TransportMode::Road,
            })
        );
        assert_eq!(destination().delivery_window(), None);
    }
}
