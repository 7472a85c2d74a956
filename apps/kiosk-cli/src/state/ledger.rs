//! # Ledger State
//!
//! Owns the in-memory [`Ledger`] and the store it is persisted to.
//!
//! ## Command Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command(args)                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ledger.<op>(args) ── Err ──► ApiError, nothing changed, nothing saved │
//! │       │ Ok                                                              │
//! │       ▼                                                                 │
//! │  store.save(products) ── Err ──► ApiError STORAGE_ERROR                │
//! │       │ Ok                       (in-memory change is kept; the next   │
//! │       ▼                           successful save writes it)           │
//! │  return result                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kiosk_core::{AddOutcome, Ledger, Money, Product, StockInput};
use kiosk_db::ProductStore;
use tracing::{debug, error, info, warn};

use crate::error::ApiError;

/// Single controller over the ledger and its store.
#[derive(Debug)]
pub struct LedgerState<S: ProductStore> {
    ledger: Ledger,
    store: S,
    unsaved: bool,
}

impl<S: ProductStore> LedgerState<S> {
    /// Loads the stored products. Unreadable storage yields an empty ledger.
    pub async fn open(store: S) -> Self {
        let products = store.load().await;
        let ledger = Ledger::from_products(products).unwrap_or_else(|e| {
            warn!(error = %e, "Stored products rejected, starting empty");
            Ledger::new()
        });
        info!(products = ledger.len(), "Ledger loaded");

        LedgerState {
            ledger,
            store,
            unsaved: false,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// True after a save failed and no later save has succeeded.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub async fn add_or_restock(&mut self, input: StockInput) -> Result<AddOutcome, ApiError> {
        debug!(name = %input.name, quantity = input.quantity, "Add or restock");
        let outcome = self.ledger.add_or_restock(input)?;
        info!(
            id = %outcome.product.id,
            name = %outcome.product.name,
            created = outcome.created,
            stock = outcome.product.quantity,
            "Stock recorded"
        );
        self.persist().await?;
        Ok(outcome)
    }

    pub async fn record_sale(&mut self, id: &str, quantity: u32) -> Result<Product, ApiError> {
        debug!(id = %id, quantity, "Record sale");
        let product = self.ledger.record_sale(id, quantity)?;
        info!(
            id = %product.id,
            quantity,
            remaining = product.quantity,
            hidden = product.hidden,
            "Sale recorded"
        );
        self.persist().await?;
        Ok(product)
    }

    pub async fn hide(&mut self, id: &str) -> Result<Product, ApiError> {
        debug!(id = %id, "Hide product");
        let product = self.ledger.hide(id)?;
        self.persist().await?;
        Ok(product)
    }

    pub async fn restore(&mut self, id: &str) -> Result<Product, ApiError> {
        debug!(id = %id, "Restore product");
        let product = self.ledger.restore(id)?;
        self.persist().await?;
        Ok(product)
    }

    /// Removes a product. An unknown id changes nothing and saves nothing.
    pub async fn delete(&mut self, id: &str) -> Result<Option<Product>, ApiError> {
        debug!(id = %id, "Delete product");
        match self.ledger.delete(id) {
            Some(product) => {
                info!(id = %product.id, name = %product.name, "Product deleted");
                self.persist().await?;
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    /// Zeroes every sold counter. Returns how many products were touched.
    pub async fn start_new_day(&mut self) -> Result<usize, ApiError> {
        let reset = self.ledger.start_new_day();
        info!(products = reset, "New day started");
        self.persist().await?;
        Ok(reset)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn compute_profit(&self) -> Money {
        self.ledger.compute_profit()
    }

    pub fn list_active(&self) -> Vec<&Product> {
        self.ledger.list_active()
    }

    pub fn list_hidden(&self) -> Vec<&Product> {
        self.ledger.list_hidden()
    }

    pub fn list_sellable(&self) -> Vec<&Product> {
        self.ledger.list_sellable()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    async fn persist(&mut self) -> Result<(), ApiError> {
        match self.store.save(self.ledger.products()).await {
            Ok(()) => {
                if self.unsaved {
                    info!("Earlier unsaved changes are now stored");
                }
                self.unsaved = false;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to save ledger; change kept in memory only");
                self.unsaved = true;
                Err(e.into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
