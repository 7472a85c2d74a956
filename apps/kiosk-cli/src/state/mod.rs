//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │  LedgerState<S>              │   │  KioskConfig                 │   │
//! │  │                              │   │                              │   │
//! │  │  Ledger (in-memory truth)    │   │  currency symbol             │   │
//! │  │  S: ProductStore (durable)   │   │  backup location             │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  One operator, one command at a time: the controller owns the ledger   │
//! │  and each command borrows it mutably until its save has finished.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod ledger;

pub use ledger::LedgerState;
