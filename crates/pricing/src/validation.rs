//! Structural checks run before any pricing.

use rust_decimal::Decimal;
use thiserror::Error;

use tally_core::DomainError;

use crate::model::{Invoice, LineItem};

/// A single structural problem with an invoice.
///
/// The display text is the message surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("Invoice is missing")]
    InvoiceMissing,
    #[error("Missing invoice_id")]
    MissingInvoiceId,
    #[error("Missing customer_id")]
    MissingCustomerId,
    #[error("Invoice must contain items")]
    NoItems,
    #[error("Item sku is missing")]
    MissingSku,
    #[error("Invalid qty for {sku}")]
    InvalidQty { sku: String },
    #[error("Invalid price for {sku}")]
    InvalidPrice { sku: String },
    #[error("Unknown category for {sku}")]
    UnknownCategory { sku: String },
}

/// Collect every problem with `invoice`, in detection order.
///
/// A missing invoice short-circuits; everything else is accumulated.
pub fn validate(invoice: Option<&Invoice>) -> Vec<Problem> {
    let Some(invoice) = invoice else {
        return vec![Problem::InvoiceMissing];
    };

    let mut problems = Vec::new();

    if invoice.invoice_id.is_empty() {
        problems.push(Problem::MissingInvoiceId);
    }
    if invoice.customer_id.is_empty() {
        problems.push(Problem::MissingCustomerId);
    }
    if invoice.items.is_empty() {
        problems.push(Problem::NoItems);
    }

    for item in &invoice.items {
        validate_item(item, &mut problems);
    }

    problems
}

fn validate_item(item: &LineItem, problems: &mut Vec<Problem>) {
    if item.sku.is_empty() {
        problems.push(Problem::MissingSku);
    }
    if item.qty <= 0 {
        problems.push(Problem::InvalidQty {
            sku: item.sku.clone(),
        });
    }
    if item.unit_price < Decimal::ZERO {
        problems.push(Problem::InvalidPrice {
            sku: item.sku.clone(),
        });
    }
    if !item.category.is_recognized() {
        problems.push(Problem::UnknownCategory {
            sku: item.sku.clone(),
        });
    }
}

/// Fold a non-empty problem list into the error returned to callers.
pub fn into_error(problems: &[Problem]) -> DomainError {
    DomainError::validation(problems.iter().map(ToString::to_string))
}
