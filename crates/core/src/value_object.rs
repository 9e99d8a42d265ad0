//! Value object trait: equality by value, not identity.
//!
//! Invoices, line items and price breakdowns are value objects: they are built
//! by the caller, read once by the engine and discarded.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Two line items
/// with the same sku, price and quantity are the same line item as far as
/// pricing is concerned.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Money {
///     amount: Decimal,
/// }
///
/// impl ValueObject for Money {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
