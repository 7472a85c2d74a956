//! # Sale Commands
//!
//! ## Sale Flow
//! ```text
//! sale_targets()            → [ "Tomato (stock: 20)", "Onion (stock: 9)" ]
//!      │ operator picks one, types a quantity
//!      ▼
//! record_sale(id, "4")
//!      ├── quantity must be a whole number > 0
//!      ├── product must exist
//!      ├── quantity ≤ stock
//!      ▼
//! stock -= 4, sold += 4; stock 0 → hidden
//! ```

use serde::Serialize;

use crate::commands::product::ProductDto;
use crate::error::ApiError;
use crate::state::LedgerState;
use kiosk_core::validation;
use kiosk_core::Money;
use kiosk_db::ProductStore;

/// One entry of the sale-target picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleTarget {
    pub id: String,
    /// `"<name> (stock: <quantity>)"`
    pub label: String,
}

/// What a recorded sale did.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleReceipt {
    /// The product after the sale.
    pub product: ProductDto,
    pub quantity: u32,
    pub revenue: Money,
    pub profit: Money,
    /// This sale emptied the stock and hid the product.
    pub sold_out: bool,
}

/// Products that can be sold right now, in ledger order.
pub fn sale_targets<S: ProductStore>(state: &LedgerState<S>) -> Vec<SaleTarget> {
    state
        .list_sellable()
        .into_iter()
        .map(|p| SaleTarget {
            id: p.id.clone(),
            label: p.sale_label(),
        })
        .collect()
}

/// Records a sale of `quantity` (operator text) units of product `id`.
pub async fn record_sale<S: ProductStore>(
    state: &mut LedgerState<S>,
    id: &str,
    quantity: &str,
) -> Result<SaleReceipt, ApiError> {
    let quantity = validation::parse_quantity("quantity", quantity)?;
    let product = state.record_sale(id, quantity).await?;

    Ok(SaleReceipt {
        revenue: product.selling_price * quantity,
        profit: product.unit_profit() * quantity,
        sold_out: product.quantity == 0,
        product: product.into(),
        quantity,
    })
}
