use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_core::ValueObject;

/// Product category of a line item.
///
/// Values outside the known set are kept as [`Category::Unrecognized`] so the
/// validator can report them against the item's sku instead of failing at
/// parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Book,
    Food,
    Electronics,
    Other,
    Unrecognized(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Book => "book",
            Category::Food => "food",
            Category::Electronics => "electronics",
            Category::Other => "other",
            Category::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Unrecognized(String::new())
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value {
            "book" => Category::Book,
            "food" => Category::Food,
            "electronics" => Category::Electronics,
            "other" => Category::Other,
            _ => Category::Unrecognized(value.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match Category::from(value.as_str()) {
            Category::Unrecognized(_) => Category::Unrecognized(value),
            known => known,
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized membership tiers.
///
/// Invoices carry membership as free text; anything that does not parse to a
/// tier means "no membership".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    Gold,
    Platinum,
}

impl MembershipTier {
    /// Exact, case-sensitive match against the tier names.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gold" => Some(MembershipTier::Gold),
            "platinum" => Some(MembershipTier::Platinum),
            _ => None,
        }
    }
}

/// A single invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub category: Category,
    pub unit_price: Decimal,
    /// Signed so that non-positive quantities reach the validator.
    pub qty: i64,
    #[serde(default)]
    pub fragile: bool,
}

impl LineItem {
    pub fn new(
        sku: impl Into<String>,
        category: impl Into<Category>,
        unit_price: Decimal,
        qty: i64,
    ) -> Self {
        Self {
            sku: sku.into(),
            category: category.into(),
            unit_price,
            qty,
            fragile: false,
        }
    }

    pub fn fragile(mut self) -> Self {
        self.fragile = true;
        self
    }

    /// `unit_price * qty`, unrounded; `None` if it does not fit in a `Decimal`.
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.qty))
    }
}

impl ValueObject for LineItem {}

/// Invoice submitted for pricing.
///
/// Missing identifiers and an absent item list deserialize as empty values so
/// they are reported by validation rather than rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub invoice_id: String,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub membership: String,
    #[serde(default)]
    pub coupon: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Invoice {
    pub fn new(
        invoice_id: impl Into<String>,
        customer_id: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            customer_id: customer_id.into(),
            country: country.into(),
            membership: "none".to_string(),
            coupon: None,
            items: Vec::new(),
        }
    }

    pub fn with_membership(mut self, membership: impl Into<String>) -> Self {
        self.membership = membership.into();
        self
    }

    pub fn with_coupon(mut self, coupon: impl Into<String>) -> Self {
        self.coupon = Some(coupon.into());
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }
}

impl ValueObject for Invoice {}
