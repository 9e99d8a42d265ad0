use std::sync::OnceLock;

use rust_decimal::Decimal;

use tally_core::DomainResult;

use crate::calculators::{self, UPGRADE_SUGGESTION_THRESHOLD};
use crate::config::PricingConfig;
use crate::model::Invoice;
use crate::quote::{PriceBreakdown, Quote, Warning};
use crate::validation;

/// Prices invoices against a fixed set of rate tables.
///
/// The engine holds no per-call state, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Engine over the built-in default tables.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Process-wide engine over the default tables, built on first use.
    pub fn shared() -> &'static PricingEngine {
        static ENGINE: OnceLock<PricingEngine> = OnceLock::new();
        ENGINE.get_or_init(PricingEngine::new)
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Price an invoice.
    ///
    /// Accepts `&Invoice` or `Option<&Invoice>`; `None` is reported as a
    /// missing invoice. Structural problems fail the whole call with every
    /// problem listed; advisories come back in [`Quote::warnings`].
    pub fn compute_total<'a>(&self, invoice: impl Into<Option<&'a Invoice>>) -> DomainResult<Quote> {
        let invoice = invoice.into();
        let span = tracing::info_span!(
            "compute_total",
            invoice_id = invoice.map(|inv| inv.invoice_id.as_str()).unwrap_or_default()
        );
        let _guard = span.enter();

        let problems = validation::validate(invoice);
        let invoice = match invoice {
            Some(invoice) if problems.is_empty() => invoice,
            _ => {
                let err = validation::into_error(&problems);
                tracing::warn!(problems = problems.len(), "invoice rejected: {err}");
                return Err(err);
            }
        };

        let mut warnings = Vec::new();

        let (subtotal, fragile_fee) = calculators::aggregate(&invoice.items)?;
        let shipping =
            calculators::shipping_fee(self.config.shipping_tiers(&invoice.country), subtotal);
        let discount = calculators::discount(&self.config, invoice, subtotal, &mut warnings)?;
        let taxable_amount = subtotal
            .checked_sub(discount)
            .ok_or_else(|| calculators::overflow("taxable amount"))?;
        let tax = calculators::tax(self.config.tax_rate(&invoice.country), taxable_amount)?;

        let breakdown = PriceBreakdown {
            subtotal,
            fragile_fee,
            shipping,
            discount,
            tax,
        };
        let total = breakdown.unclamped_total()?.max(Decimal::ZERO);

        if subtotal > UPGRADE_SUGGESTION_THRESHOLD
            && self.config.membership_rate(&invoice.membership).is_none()
        {
            warnings.push(Warning::ConsiderMembershipUpgrade);
        }

        tracing::debug!(
            %subtotal,
            %fragile_fee,
            %shipping,
            %discount,
            %tax,
            %total,
            "invoice priced"
        );
        for warning in &warnings {
            tracing::info!(%warning, "pricing advisory");
        }

        Ok(Quote {
            total,
            warnings,
            breakdown,
        })
    }
}
