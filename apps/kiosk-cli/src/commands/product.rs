//! # Product Commands
//!
//! Stocking and visibility of products.
//!
//! ## Product Visibility
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   add (new name)                                                        │
//! │        │                                                                │
//! │        ▼          sale to 0 / hide                                      │
//! │   ┌─────────┐  ───────────────────────►  ┌─────────┐                   │
//! │   │ VISIBLE │                            │ HIDDEN  │                   │
//! │   └─────────┘  ◄───────────────────────  └─────────┘                   │
//! │        │          restore / restock                 │                   │
//! │        │                                            │                   │
//! │        └────────────── delete ──────────────────────┘──► gone          │
//! │                                                                         │
//! │  VISIBLE with stock 0 is allowed (restored sold-out item); it is        │
//! │  listed as active but is not a sale target.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::LedgerState;
use kiosk_core::{Money, Product, StockInput};
use kiosk_db::ProductStore;

/// Product as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub buying_price: Money,
    pub selling_price: Money,
    pub quantity: u32,
    pub sold_quantity: u32,
    pub hidden: bool,
    /// Visible with stock: offered as a sale target.
    pub sellable: bool,
    /// Profit from units sold today at current prices.
    pub profit: Money,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            id: p.id.clone(),
            name: p.name.clone(),
            buying_price: p.buying_price,
            selling_price: p.selling_price,
            quantity: p.quantity,
            sold_quantity: p.sold_quantity,
            hidden: p.hidden,
            sellable: p.is_sellable(),
            profit: p.profit(),
        }
    }
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto::from(&p)
    }
}

/// Outcome of [`add_product`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductResult {
    pub product: ProductDto,
    /// `false` when an existing product was restocked.
    pub created: bool,
}

/// Which products a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductFilter {
    /// Not hidden (includes restored zero-stock items).
    #[default]
    Active,
    Hidden,
    /// Not hidden and in stock.
    Sellable,
    All,
}

/// Adds a new product, or restocks the one whose name matches
/// case-insensitively.
///
/// ## Arguments
/// Raw operator text; prices take at most two decimals, quantity must be a
/// whole non-negative number.
///
/// ## Restock Semantics
/// Both prices are replaced by the new ones, the quantity is added to the
/// current stock, and a hidden product becomes visible again.
pub async fn add_product<S: ProductStore>(
    state: &mut LedgerState<S>,
    name: &str,
    buying_price: &str,
    selling_price: &str,
    quantity: &str,
) -> Result<AddProductResult, ApiError> {
    let input = StockInput::parse(name, buying_price, selling_price, quantity)?;
    let outcome = state.add_or_restock(input).await?;
    Ok(AddProductResult {
        product: outcome.product.into(),
        created: outcome.created,
    })
}

pub async fn hide_product<S: ProductStore>(
    state: &mut LedgerState<S>,
    id: &str,
) -> Result<ProductDto, ApiError> {
    Ok(state.hide(id).await?.into())
}

pub async fn restore_product<S: ProductStore>(
    state: &mut LedgerState<S>,
    id: &str,
) -> Result<ProductDto, ApiError> {
    Ok(state.restore(id).await?.into())
}

/// Permanently removes a product. Returns `None` for an unknown id.
///
/// Callers confirm with the operator first; this function does not ask.
pub async fn delete_product<S: ProductStore>(
    state: &mut LedgerState<S>,
    id: &str,
) -> Result<Option<ProductDto>, ApiError> {
    Ok(state.delete(id).await?.map(ProductDto::from))
}

/// Lists products in ledger (creation) order.
pub fn list_products<S: ProductStore>(
    state: &LedgerState<S>,
    filter: ProductFilter,
) -> Vec<ProductDto> {
    let products: Vec<&Product> = match filter {
        ProductFilter::Active => state.list_active(),
        ProductFilter::Hidden => state.list_hidden(),
        ProductFilter::Sellable => state.list_sellable(),
        ProductFilter::All => state.ledger().products().iter().collect(),
    };
    debug!(?filter, count = products.len(), "Listing products");
    products.into_iter().map(ProductDto::from).collect()
}
