//! # Commands Module
//!
//! Every operation the operator can run, as functions over [`LedgerState`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── add/restock, hide, restore, delete, list
//! ├── sale.rs     ◄─── record sale, sale targets
//! ├── day.rs      ◄─── profit summary, new day
//! └── backup.rs   ◄─── JSON backup export
//! ```
//!
//! ## How Commands Work
//! ```text
//! kiosk sell 3f2a… 4
//!        │
//!        ▼
//! commands::sale::record_sale(&mut state, "3f2a…", "4")
//!        │   parse operator text → typed values (ValidationError on bad input)
//!        │   LedgerState: mutate → save
//!        ▼
//! Result<SaleReceipt, ApiError>  ──► output::Printer (text) or serde_json (--json)
//! ```
//!
//! [`LedgerState`]: crate::state::LedgerState

pub mod backup;
pub mod day;
pub mod product;
pub mod sale;

pub use product::ProductDto;
