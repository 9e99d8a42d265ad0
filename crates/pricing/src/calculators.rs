//! Individual pricing steps.
//!
//! Each step is a pure function over already-validated input; the engine
//! wires them together in a fixed order.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tally_core::{DomainError, DomainResult};

use crate::config::{PricingConfig, ShippingTier};
use crate::model::{Invoice, LineItem};
use crate::quote::Warning;

/// Handling surcharge per fragile unit.
pub const FRAGILE_FEE_PER_UNIT: Decimal = dec!(5.0);

/// Subtotal above which members-less orders get [`LARGE_ORDER_DISCOUNT`].
pub const LARGE_ORDER_THRESHOLD: Decimal = dec!(3000);

/// Flat amount, not a rate.
pub const LARGE_ORDER_DISCOUNT: Decimal = dec!(20);

/// Subtotal above which tier-less customers are nudged to upgrade.
pub const UPGRADE_SUGGESTION_THRESHOLD: Decimal = dec!(10000);

/// Returns `(subtotal, fragile_fee)`.
pub fn aggregate(items: &[LineItem]) -> DomainResult<(Decimal, Decimal)> {
    let mut subtotal = Decimal::ZERO;
    let mut fragile_fee = Decimal::ZERO;

    for item in items {
        subtotal = item
            .line_total()
            .and_then(|line| subtotal.checked_add(line))
            .ok_or_else(|| overflow("subtotal"))?;
        if item.fragile {
            fragile_fee = FRAGILE_FEE_PER_UNIT
                .checked_mul(Decimal::from(item.qty))
                .and_then(|fee| fragile_fee.checked_add(fee))
                .ok_or_else(|| overflow("fragile fee"))?;
        }
    }

    Ok((subtotal, fragile_fee))
}

/// Fee of the first tier whose threshold exceeds `subtotal`; free otherwise.
///
/// Tiers are scanned in the given order and never re-sorted.
pub fn shipping_fee(tiers: &[ShippingTier], subtotal: Decimal) -> Decimal {
    tiers
        .iter()
        .find(|tier| subtotal < tier.threshold)
        .map_or(Decimal::ZERO, |tier| tier.fee)
}

/// Membership (or large-order) discount plus coupon discount.
///
/// An unrecognized coupon contributes nothing and records
/// [`Warning::UnknownCoupon`]. The sum is not capped at the subtotal.
pub fn discount(
    config: &PricingConfig,
    invoice: &Invoice,
    subtotal: Decimal,
    warnings: &mut Vec<Warning>,
) -> DomainResult<Decimal> {
    let mut discount = Decimal::ZERO;

    if let Some(rate) = config.membership_rate(&invoice.membership) {
        discount = subtotal
            .checked_mul(rate)
            .ok_or_else(|| overflow("membership discount"))?;
    } else if subtotal > LARGE_ORDER_THRESHOLD {
        discount = LARGE_ORDER_DISCOUNT;
    }

    // An empty string counts as no coupon at all; whitespace-only does not.
    if let Some(coupon) = invoice.coupon.as_deref().filter(|c| !c.is_empty()) {
        match config.coupon_rate(coupon.trim()) {
            Some(rate) => {
                discount = subtotal
                    .checked_mul(rate)
                    .and_then(|amount| discount.checked_add(amount))
                    .ok_or_else(|| overflow("coupon discount"))?;
            }
            None => warnings.push(Warning::UnknownCoupon),
        }
    }

    Ok(discount)
}

/// Flat-rate tax on the taxable amount; may be negative.
pub fn tax(rate: Decimal, taxable_amount: Decimal) -> DomainResult<Decimal> {
    taxable_amount
        .checked_mul(rate)
        .ok_or_else(|| overflow("tax"))
}

/// Error for an amount that no longer fits in a `Decimal`.
pub(crate) fn overflow(amount: &str) -> DomainError {
    DomainError::invariant(format!("{amount} overflow"))
}
