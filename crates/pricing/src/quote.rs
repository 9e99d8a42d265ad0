use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use tally_core::{DomainResult, ValueObject};

use crate::calculators::overflow;

/// Non-fatal advisory returned alongside a successful total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    /// A coupon was supplied but did not match any configured code.
    UnknownCoupon,
    /// Large order placed without a recognized membership tier.
    ConsiderMembershipUpgrade,
}

impl Warning {
    pub fn message(self) -> &'static str {
        match self {
            Warning::UnknownCoupon => "Unknown coupon",
            Warning::ConsiderMembershipUpgrade => "Consider membership upgrade",
        }
    }
}

impl core::fmt::Display for Warning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Every intermediate amount that went into a total, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub fragile_fee: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    /// Computed on `subtotal - discount`; negative when the discount exceeds the subtotal.
    pub tax: Decimal,
}

impl PriceBreakdown {
    /// `subtotal + shipping + fragile_fee + tax - discount`, before the zero floor.
    pub fn unclamped_total(&self) -> DomainResult<Decimal> {
        self.subtotal
            .checked_add(self.shipping)
            .and_then(|sum| sum.checked_add(self.fragile_fee))
            .and_then(|sum| sum.checked_add(self.tax))
            .and_then(|sum| sum.checked_sub(self.discount))
            .ok_or_else(|| overflow("total"))
    }
}

impl ValueObject for PriceBreakdown {}

/// Result of pricing one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub total: Decimal,
    /// In detection order.
    pub warnings: Vec<Warning>,
    pub breakdown: PriceBreakdown,
}

impl Quote {
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// The plain `(total, warnings)` pair.
    pub fn into_parts(self) -> (Decimal, Vec<String>) {
        let messages = self.warning_messages();
        (self.total, messages)
    }
}

impl ValueObject for Quote {}
