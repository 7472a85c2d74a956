//! # kiosk-db: Storage Layer for the Kiosk Ledger
//!
//! Keeps the kiosk's product list in a local SQLite file, the way a browser
//! kiosk would keep it in local storage: one serialized document under one
//! fixed key, overwritten on every save.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kiosk Ledger Data Flow                           │
//! │                                                                         │
//! │  LedgerState (kiosk-cli) ── mutation succeeded ──► save(products)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kiosk-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │ ProductStore    │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ ProductRepo     │   │  (embedded)  │  │   │
//! │  │   └───────────────┘    └─────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kv_store: kiosk_products_v1 → [{"id":…,"name":…,…}, …]                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kiosk_db::{Database, DbConfig, ProductStore};
//!
//! let db = Database::new(DbConfig::new("kiosk.db")).await?;
//! let repo = db.products();
//!
//! let products = repo.load().await;      // never fails; corrupt → empty
//! repo.save(&products).await?;           // fails with DbError
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::product::{ProductRepository, ProductStore, PRODUCTS_KEY};
