//! Invoice pricing domain module.
//!
//! This crate turns an invoice into a payable total: validation, subtotal and
//! fragile-fee aggregation, tiered shipping, stacked discounts and tax,
//! implemented purely as deterministic domain logic (no HTTP, no storage).

pub mod calculators;
pub mod config;
pub mod engine;
pub mod model;
pub mod quote;
pub mod validation;

pub use config::{CountryTable, PricingConfig, ShippingTier, FALLBACK_COUNTRY};
pub use engine::PricingEngine;
pub use model::{Category, Invoice, LineItem, MembershipTier};
pub use quote::{PriceBreakdown, Quote, Warning};
pub use validation::{validate, Problem};
