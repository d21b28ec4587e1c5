//! Road-freight pricing engine.
//!
//! Turns cargo dimensions, a declared invoice value and a destination
//! category into an itemized [`PricingBreakdown`]:
//!
//! - taxable weight from real and volumetric weight ([`weight`])
//! - banded tariff with per-kilogram overage ([`tariff`])
//! - corridor multiplier and toll points ([`corridor`])
//! - regional parameter overrides, settled field by field ([`regional`])
//! - toll, insurance and cargo-risk fees ([`standard`])
//! - destination special surcharges ([`special`])
//!
//! [`compute`] is pure. Looking up tables, parameters and surcharges is the
//! caller's job; [`lookup`] holds the resolution policy for callers that
//! implement [`lookup::PricingSource`].

pub mod corridor;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod models;
pub mod regional;
pub mod special;
pub mod standard;
pub mod tariff;
pub mod utils;
pub mod weight;

pub use engine::{apply_special_surcharges, compute, compute_standard};
pub use error::{PricingError, Result};
pub use models::breakdown::PricingBreakdown;
