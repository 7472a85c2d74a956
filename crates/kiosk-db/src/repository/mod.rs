//! # Repository Module
//!
//! Storage access for the kiosk.
//!
//! ```text
//! LedgerState ──► ProductStore (trait) ◄── ProductRepository (SQLite)
//!                                     ◄── test doubles
//! ```
//!
//! - [`product::ProductRepository`] - load/save of the product document

pub mod product;
