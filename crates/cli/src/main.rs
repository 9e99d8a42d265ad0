//! `tally <invoice.json> [config.json]`
//!
//! Prices one invoice document and prints the quote as JSON on stdout.
//! A JSON `null` document is priced as a missing invoice.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tally_pricing::{Invoice, PricingConfig, PricingEngine};

const USAGE: &str = "usage: tally <invoice.json> [config.json]";

fn main() -> Result<()> {
    tally_observability::init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let invoice_path = args.next().context(USAGE)?;
    let config_path = args.next();

    let engine = match config_path {
        Some(path) => {
            let config = PricingConfig::from_json_file(&path)
                .with_context(|| format!("loading pricing config {}", path.display()))?;
            PricingEngine::with_config(config)
        }
        None => {
            tracing::debug!("no config given; using built-in tables");
            PricingEngine::new()
        }
    };

    let raw = std::fs::read_to_string(&invoice_path)
        .with_context(|| format!("reading {}", invoice_path.display()))?;
    let invoice: Option<Invoice> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", invoice_path.display()))?;

    let quote = engine
        .compute_total(invoice.as_ref())
        .context("invoice rejected")?;

    tracing::info!(
        invoice_id = invoice.as_ref().map(|inv| inv.invoice_id.as_str()).unwrap_or_default(),
        total = %quote.total,
        warnings = quote.warnings.len(),
        "invoice priced"
    );

    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}
