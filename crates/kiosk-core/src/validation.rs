//! # Validation Module
//!
//! Input parsing and rule checks for the kiosk ledger.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command line (kiosk-cli)                                     │
//! │  └── Raw text → typed values via the parse_* functions here            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ledger operations                                            │
//! │  └── validate_* before any product is touched                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage load boundary (kiosk-db)                             │
//! │  └── validate_stored_product on every record read back                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::validation::{parse_price, parse_quantity, validate_sale_quantity};
//!
//! let price = parse_price("buying price", "12.50").unwrap();
//! assert_eq!(price.cents(), 1250);
//!
//! assert_eq!(parse_quantity("quantity", "20").unwrap(), 20);
//! assert!(parse_quantity("quantity", "-1").is_err());
//! assert!(validate_sale_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_PRICE_CENTS, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_PRODUCT_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use kiosk_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Sukuma Wiki").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product id reference.
///
/// Ids are opaque: anything non-blank is accepted, so ids written by earlier
/// versions of the kiosk (which were not UUIDs) still resolve.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (giveaways)
/// - At most [`MAX_PRICE_CENTS`]
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS / 100,
        });
    }

    Ok(())
}

/// Validates the quantity of a single sale.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Record Sale                                                            │
/// │                                                                         │
/// │  Operator enters quantity: 5                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_sale_quantity(5) ← THIS FUNCTION                             │
/// │       │                                                                 │
/// │       ├── qty == 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       └── OK → stock check in Ledger::record_sale                      │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_sale_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Parsers (raw operator text → typed values)
// =============================================================================

/// Parses a non-negative price from operator input.
pub fn parse_price(field: &str, input: &str) -> ValidationResult<Money> {
    let price = Money::parse_decimal(field, input)?;
    validate_price(field, price)?;
    Ok(price)
}

/// Parses a non-negative whole-unit quantity.
///
/// ## Rules
/// - Digits only (after trimming and an optional `+`)
/// - Negative values → `OutOfRange`
/// - Fractions or words → `InvalidFormat`
pub fn parse_quantity(field: &str, input: &str) -> ValidationResult<u32> {
    let text = input.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let out_of_range = || ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: u32::MAX as i64,
    };

    if let Some(rest) = text.strip_prefix('-') {
        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(out_of_range());
        }
    }

    let digits = text.strip_prefix('+').unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        });
    }

    digits.parse::<u32>().map_err(|_| out_of_range())
}

// =============================================================================
// Stored Record Validators
// =============================================================================

/// Validates a product read back from storage.
///
/// Field presence and types are already enforced by deserialization; this
/// checks the rules a well-formed record could still break.
pub fn validate_stored_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_product_name(&product.name)?;
    validate_price("buying price", product.buying_price)?;
    validate_price("selling price", product.selling_price)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Tomato").is_ok());
        assert!(validate_product_name("  Onions  ").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(" \t ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("price", Money::zero()).is_ok());
        assert!(validate_price("price", Money::from_cents(1099)).is_ok());
        assert!(validate_price("price", Money::from_cents(-1)).is_err());
        assert!(validate_price("price", Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(matches!(
            validate_price("price", Money::from_cents(MAX_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_price_rejects_amounts_above_cap() {
        assert!(parse_price("selling price", "1000000000").is_ok());
        assert!(matches!(
            parse_price("selling price", "1000000000.01"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_price("selling price", "92233720368547758.07"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("buying price", "5").unwrap().cents(), 500);
        assert!(matches!(
            parse_price("buying price", "-5"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_price("buying price", "five"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("quantity", "0").unwrap(), 0);
        assert_eq!(parse_quantity("quantity", " 20 ").unwrap(), 20);
        assert_eq!(parse_quantity("quantity", "+3").unwrap(), 3);

        assert!(matches!(
            parse_quantity("quantity", "-1"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_quantity("quantity", "2.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("quantity", "ten"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_quantity("quantity", "99999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_quantity("quantity", ""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_sale_quantity() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("lx3k9a2b").is_ok());
        assert!(validate_product_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_product_id("  ").is_err());
    }
}
