//! # Domain Types
//!
//! Core domain types used throughout the kiosk ledger.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   StockInput    │   │     Backup      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  name           │   │  exportedAt     │       │
//! │  │  name           │   │  buying_price   │   │  products[]     │       │
//! │  │  buyingPrice    │   │  selling_price  │   └─────────────────┘       │
//! │  │  sellingPrice   │   │  quantity       │                              │
//! │  │  quantity       │   └─────────────────┘                              │
//! │  │  soldQuantity   │                                                    │
//! │  │  hidden         │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase; that layout is the stored format.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{self, ValidationResult};

// =============================================================================
// Product
// =============================================================================

/// One stocked item.
///
/// ## Defaults
/// `soldQuantity` and `hidden` may be absent in stored data; they default to
/// `0` and `false` once, when the record is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Opaque identifier, assigned at creation and never reused.
    pub id: String,

    /// Display name. Unique (case-insensitively) within a ledger.
    pub name: String,

    /// Unit cost.
    #[ts(type = "number")]
    pub buying_price: Money,

    /// Unit selling price.
    #[ts(type = "number")]
    pub selling_price: Money,

    /// Stock on hand.
    pub quantity: u32,

    /// Units sold since the last day-reset.
    #[serde(default)]
    pub sold_quantity: u32,

    /// Excluded from the active list and from sale targets.
    #[serde(default)]
    pub hidden: bool,
}

impl Product {
    /// Creates a fresh, visible product with nothing sold yet.
    pub fn new(id: impl Into<String>, input: &StockInput) -> Self {
        Product {
            id: id.into(),
            name: input.name.clone(),
            buying_price: input.buying_price,
            selling_price: input.selling_price,
            quantity: input.quantity,
            sold_quantity: 0,
            hidden: false,
        }
    }

    /// Margin on one unit at current prices (may be negative).
    #[inline]
    pub fn unit_profit(&self) -> Money {
        self.selling_price - self.buying_price
    }

    /// Profit from units sold since the last day-reset, at current prices.
    #[inline]
    pub fn profit(&self) -> Money {
        self.unit_profit() * self.sold_quantity
    }

    /// Visible and has stock: can be picked as a sale target.
    #[inline]
    pub fn is_sellable(&self) -> bool {
        !self.hidden && self.quantity > 0
    }

    /// Case-insensitive name comparison used for restock matching.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Label for a sale-target picker, e.g. `"Tomato (stock: 20)"`.
    pub fn sale_label(&self) -> String {
        format!("{} (stock: {})", self.name, self.quantity)
    }
}

/// Generates a new product id.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Stock Input
// =============================================================================

/// Arguments of an add-or-restock operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockInput {
    pub name: String,
    pub buying_price: Money,
    pub selling_price: Money,
    pub quantity: u32,
}

impl StockInput {
    /// Builds input from typed values. The name is trimmed; nothing else is
    /// checked until [`StockInput::validate`].
    pub fn new(
        name: impl Into<String>,
        buying_price: Money,
        selling_price: Money,
        quantity: u32,
    ) -> Self {
        StockInput {
            name: name.into().trim().to_string(),
            buying_price,
            selling_price,
            quantity,
        }
    }

    /// Parses raw operator text.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::StockInput;
    ///
    /// let input = StockInput::parse(" Tomato ", "5", "8", "20").unwrap();
    /// assert_eq!(input.name, "Tomato");
    /// assert_eq!(input.selling_price.cents(), 800);
    ///
    /// assert!(StockInput::parse("Tomato", "abc", "8", "20").is_err());
    /// ```
    pub fn parse(name: &str, buying: &str, selling: &str, quantity: &str) -> ValidationResult<Self> {
        validation::validate_product_name(name)?;
        let input = StockInput {
            name: name.trim().to_string(),
            buying_price: validation::parse_price("buying price", buying)?,
            selling_price: validation::parse_price("selling price", selling)?,
            quantity: validation::parse_quantity("quantity", quantity)?,
        };
        Ok(input)
    }

    /// Checks every precondition of add-or-restock.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_product_name(&self.name)?;
        validation::validate_price("buying price", self.buying_price)?;
        validation::validate_price("selling price", self.selling_price)?;
        Ok(())
    }
}

// =============================================================================
// Backup
// =============================================================================

/// A point-in-time export of every product.
///
/// ## JSON Shape
/// ```json
/// {
///   "exportedAt": "2025-01-31T18:04:11.532Z",
///   "products": [ { "id": "…", "name": "Tomato", … } ]
/// }
/// ```
/// Written once for the operator to keep; never read back by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Backup {
    #[serde(serialize_with = "serialize_iso8601")]
    #[ts(as = "String")]
    pub exported_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

impl Backup {
    /// Snapshots `products` at `exported_at`.
    pub fn new(products: &[Product], exported_at: DateTime<Utc>) -> Self {
        Backup {
            exported_at,
            products: products.to_vec(),
        }
    }

    /// Pretty-printed JSON document (two-space indent).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Millisecond precision with a `Z` suffix, e.g. `2025-01-31T18:04:11.532Z`.
fn serialize_iso8601<S: serde::Serializer>(
    at: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tomato() -> Product {
        Product::new(
            "p1",
            &StockInput::new("Tomato", Money::from_cents(500), Money::from_cents(800), 20),
        )
    }

    #[test]
    fn test_new_product_defaults() {
        let p = tomato();
        assert_eq!(p.sold_quantity, 0);
        assert!(!p.hidden);
        assert!(p.is_sellable());
        assert_eq!(p.sale_label(), "Tomato (stock: 20)");
    }

    #[test]
    fn test_profit_helpers() {
        let mut p = tomato();
        assert_eq!(p.unit_profit().cents(), 300);
        assert!(p.profit().is_zero());

        p.sold_quantity = 4;
        assert_eq!(p.profit().cents(), 1200);

        p.selling_price = Money::from_cents(400);
        assert_eq!(p.profit().cents(), -400);
    }

    #[test]
    fn test_name_matches_ignores_case() {
        let p = tomato();
        assert!(p.name_matches("tomato"));
        assert!(p.name_matches("  TOMATO "));
        assert!(!p.name_matches("tomatoes"));
    }

    #[test]
    fn test_stock_input_parse_rejects_bad_values() {
        assert!(StockInput::parse("", "5", "8", "1").is_err());
        assert!(StockInput::parse("Tomato", "5", "x", "1").is_err());
        assert!(StockInput::parse("Tomato", "5", "8", "-1").is_err());
        assert!(StockInput::parse("Tomato", "5", "8", "1.5").is_err());
        assert!(StockInput::parse("Tomato", "-5", "8", "1").is_err());
    }

    #[test]
    fn test_product_json_field_names() {
        let json = serde_json::to_value(tomato()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "p1",
                "name": "Tomato",
                "buyingPrice": 5,
                "sellingPrice": 8,
                "quantity": 20,
                "soldQuantity": 0,
                "hidden": false
            })
        );
    }

    #[test]
    fn test_product_missing_counters_default_on_read() {
        let p: Product = serde_json::from_str(
            r#"{"id":"a","name":"Kale","buyingPrice":2.5,"sellingPrice":4,"quantity":3}"#,
        )
        .unwrap();
        assert_eq!(p.sold_quantity, 0);
        assert!(!p.hidden);
        assert_eq!(p.buying_price.cents(), 250);
    }

    #[test]
    fn test_product_rejects_negative_quantity() {
        let result = serde_json::from_str::<Product>(
            r#"{"id":"a","name":"Kale","buyingPrice":2,"sellingPrice":4,"quantity":-3}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_backup_document() {
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 18, 4, 11).unwrap();
        let backup = Backup::new(&[tomato()], at);
        let json: serde_json::Value =
            serde_json::from_str(&backup.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["exportedAt"], "2025-01-31T18:04:11.000Z");
        assert_eq!(json["products"][0]["name"], "Tomato");
    }
}
