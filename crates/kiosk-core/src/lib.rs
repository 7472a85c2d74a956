//! # kiosk-core: Pure Business Logic for the Kiosk Ledger
//!
//! This crate holds the inventory and sale rules of a micro-retail kiosk as
//! plain data and pure functions. It never touches storage, terminals or the
//! network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kiosk Ledger Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  kiosk-cli (operator commands)                  │   │
//! │  │        add, sell, hide, restore, delete, new-day, backup        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kiosk-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  ledger   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Ledger   │  │   rules   │  │   │
//! │  │   │  Backup   │  │           │  │  profit   │  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kiosk-db (Storage Layer)                     │   │
//! │  │          one JSON document under one key in SQLite              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, StockInput, Backup)
//! - [`money`] - Money type with integer arithmetic
//! - [`ledger`] - The product collection and its state transitions
//! - [`error`] - Domain error types
//! - [`validation`] - Input parsing and rule checks
//!
//! ## Example Usage
//!
//! ```rust
//! use kiosk_core::{Ledger, Money, StockInput};
//!
//! let mut ledger = Ledger::new();
//! let added = ledger
//!     .add_or_restock(StockInput::new("Tomato", Money::from_cents(500), Money::from_cents(800), 20))
//!     .unwrap();
//!
//! ledger.record_sale(&added.product.id, 20).unwrap();
//!
//! assert_eq!(ledger.compute_profit().cents(), 6000);
//! assert!(ledger.list_sellable().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{AddOutcome, Ledger};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Highest accepted unit price, in cents (1,000,000,000.00).
///
/// Keeps every stored price exact as a JSON number read back through `f64`.
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

/// Number of fractional digits carried by [`Money`].
pub const MONEY_DECIMALS: u32 = 2;
