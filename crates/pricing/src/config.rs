//! Static rate tables consulted by the engine.
//!
//! Tables are built once (defaults or a JSON override document) and never
//! mutated afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use tally_core::{DomainError, DomainResult};

use crate::model::MembershipTier;

/// Country key whose entry applies to every unlisted country.
pub const FALLBACK_COUNTRY: &str = "OTHER";

/// One shipping breakpoint: `fee` applies while the subtotal is below `threshold`.
///
/// Deserializes from either `{"threshold": .., "fee": ..}` or `[threshold, fee]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingTier {
    pub threshold: Decimal,
    pub fee: Decimal,
}

impl ShippingTier {
    pub fn new(threshold: Decimal, fee: Decimal) -> Self {
        Self { threshold, fee }
    }
}

/// Per-country values with a mandatory fallback entry.
///
/// Serialized as a flat map keyed by country code where the fallback lives
/// under [`FALLBACK_COUNTRY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryTable<T> {
    by_country: BTreeMap<String, T>,
    fallback: T,
}

impl<T> CountryTable<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            by_country: BTreeMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, country: impl Into<String>, value: T) -> Self {
        let country = country.into();
        if country == FALLBACK_COUNTRY {
            self.fallback = value;
        } else {
            self.by_country.insert(country, value);
        }
        self
    }

    /// Build from a raw map; the map must contain a [`FALLBACK_COUNTRY`] entry.
    pub fn from_entries(mut entries: BTreeMap<String, T>) -> DomainResult<Self> {
        let fallback = entries.remove(FALLBACK_COUNTRY).ok_or_else(|| {
            DomainError::invalid_config(format!(
                "country table has no {FALLBACK_COUNTRY} entry"
            ))
        })?;
        Ok(Self {
            by_country: entries,
            fallback,
        })
    }

    /// Entry for `country`, or the fallback when the code is not listed.
    pub fn resolve(&self, country: &str) -> &T {
        self.by_country.get(country).unwrap_or(&self.fallback)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for CountryTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, T>::deserialize(deserializer)?;
        Self::from_entries(entries).map_err(serde::de::Error::custom)
    }
}

impl<T: Serialize> Serialize for CountryTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.by_country.len() + 1))?;
        for (country, value) in &self.by_country {
            map.serialize_entry(country, value)?;
        }
        map.serialize_entry(FALLBACK_COUNTRY, &self.fallback)?;
        map.end()
    }
}

/// All rate tables used by a [`crate::PricingEngine`].
///
/// Any table omitted from a JSON document keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Ordered breakpoints per country. Order is significant.
    pub shipping: CountryTable<Vec<ShippingTier>>,
    pub tax: CountryTable<Decimal>,
    pub membership_discounts: BTreeMap<MembershipTier, Decimal>,
    pub coupons: BTreeMap<String, Decimal>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let shipping = CountryTable::new(vec![ShippingTier::new(dec!(200), dec!(25))])
            .with("TH", vec![ShippingTier::new(dec!(500), dec!(60))])
            .with("JP", vec![ShippingTier::new(dec!(4000), dec!(600))])
            .with(
                "US",
                vec![
                    ShippingTier::new(dec!(100), dec!(15)),
                    ShippingTier::new(dec!(300), dec!(8)),
                ],
            );

        let tax = CountryTable::new(dec!(0.05))
            .with("TH", dec!(0.07))
            .with("JP", dec!(0.10))
            .with("US", dec!(0.08));

        let membership_discounts = BTreeMap::from([
            (MembershipTier::Gold, dec!(0.03)),
            (MembershipTier::Platinum, dec!(0.05)),
        ]);

        let coupons = BTreeMap::from([
            ("WELCOME10".to_string(), dec!(0.10)),
            ("VIP20".to_string(), dec!(0.20)),
            ("STUDENT5".to_string(), dec!(0.05)),
        ]);

        Self {
            shipping,
            tax,
            membership_discounts,
            coupons,
        }
    }
}

impl PricingConfig {
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(|e| DomainError::invalid_config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded pricing config");
        Ok(config)
    }

    pub fn shipping_tiers(&self, country: &str) -> &[ShippingTier] {
        self.shipping.resolve(country)
    }

    pub fn tax_rate(&self, country: &str) -> Decimal {
        *self.tax.resolve(country)
    }

    /// Discount rate for a membership string, `None` if it is not a configured tier.
    pub fn membership_rate(&self, membership: &str) -> Option<Decimal> {
        MembershipTier::parse(membership)
            .and_then(|tier| self.membership_discounts.get(&tier).copied())
    }

    /// Rate for an already-trimmed coupon code.
    pub fn coupon_rate(&self, code: &str) -> Option<Decimal> {
        self.coupons.get(code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_tables() {
        let config = PricingConfig::default();

        assert_eq!(
            config.shipping_tiers("US"),
            &[
                ShippingTier::new(dec!(100), dec!(15)),
                ShippingTier::new(dec!(300), dec!(8)),
            ]
        );
        assert_eq!(
            config.shipping_tiers("TH"),
            &[ShippingTier::new(dec!(500), dec!(60))]
        );
        assert_eq!(config.tax_rate("JP"), dec!(0.10));
        assert_eq!(config.membership_rate("platinum"), Some(dec!(0.05)));
        assert_eq!(config.coupon_rate("VIP20"), Some(dec!(0.20)));
    }

    #[test]
    fn unknown_country_falls_back_to_other() {
        let config = PricingConfig::default();
        assert_eq!(
            config.shipping_tiers("FR"),
            &[ShippingTier::new(dec!(200), dec!(25))]
        );
        assert_eq!(config.tax_rate("FR"), dec!(0.05));
        assert_eq!(config.tax_rate(FALLBACK_COUNTRY), dec!(0.05));
        assert_eq!(config.tax_rate(""), dec!(0.05));
    }

    #[test]
    fn unknown_membership_and_coupon_have_no_rate() {
        let config = PricingConfig::default();
        assert_eq!(config.membership_rate("none"), None);
        assert_eq!(config.membership_rate("silver"), None);
        assert_eq!(config.coupon_rate("welcome10"), None);
    }

    #[test]
    fn json_override_replaces_only_listed_tables() {
        let config = PricingConfig::from_json_str(
            r#"{
                "tax": {"DE": 0.19, "OTHER": 0.0},
                "coupons": {"SPRING": "0.15"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.tax_rate("DE"), dec!(0.19));
        assert_eq!(config.tax_rate("TH"), dec!(0.0));
        assert_eq!(config.coupon_rate("SPRING"), Some(dec!(0.15)));
        assert_eq!(config.coupon_rate("WELCOME10"), None);
        assert_eq!(config.shipping, PricingConfig::default().shipping);
    }

    #[test]
    fn shipping_tiers_accept_pair_form_and_keep_order() {
        let config = PricingConfig::from_json_str(
            r#"{"shipping": {"OTHER": [[300, 8], [100, 15]]}}"#,
        )
        .unwrap();
        assert_eq!(
            config.shipping_tiers("US"),
            &[
                ShippingTier::new(dec!(300), dec!(8)),
                ShippingTier::new(dec!(100), dec!(15)),
            ]
        );
    }

    #[test]
    fn table_without_fallback_is_rejected() {
        let err = PricingConfig::from_json_str(r#"{"tax": {"TH": 0.07}}"#).unwrap_err();
        match err {
            DomainError::InvalidConfig(msg) if msg.contains("no OTHER entry") => {}
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = PricingConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = PricingConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        match err {
            DomainError::InvalidConfig(msg) if msg.contains("cannot read") => {}
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = PricingConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PricingConfig::from_json_str(&json).unwrap(), config);
    }
}
