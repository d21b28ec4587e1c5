//! `frete` quotes road-freight shipments for the pricing desk.
//!
//! The pricing itself lives in `frete-engine`; this crate loads settings
//! and the tariff book, resolves records for the engine, and renders the
//! result.

pub mod book;
pub mod config;
pub mod handlers;
pub mod render;
