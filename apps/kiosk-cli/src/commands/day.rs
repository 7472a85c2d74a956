//! # Day Commands
//!
//! Profit is derived from today's sold counters at current prices; starting
//! a new day zeroes the counters and leaves stock, prices and visibility as
//! they are.

use serde::Serialize;

use crate::error::ApiError;
use crate::state::LedgerState;
use kiosk_core::Money;
use kiosk_db::ProductStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSummary {
    /// Σ (selling − buying) × sold, hidden products included.
    pub profit: Money,
    pub units_sold: u64,
    /// Products with at least one unit sold today.
    pub products_sold: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDayResult {
    pub products_reset: usize,
    /// The summary that was cleared.
    pub closed: ProfitSummary,
}

pub fn profit_summary<S: ProductStore>(state: &LedgerState<S>) -> ProfitSummary {
    let products = state.ledger().products();
    ProfitSummary {
        profit: state.compute_profit(),
        units_sold: products.iter().map(|p| u64::from(p.sold_quantity)).sum(),
        products_sold: products.iter().filter(|p| p.sold_quantity > 0).count(),
    }
}

/// Zeroes every sold counter. Callers confirm with the operator first.
pub async fn start_new_day<S: ProductStore>(
    state: &mut LedgerState<S>,
) -> Result<NewDayResult, ApiError> {
    let closed = profit_summary(state);
    let products_reset = state.start_new_day().await?;
    Ok(NewDayResult {
        products_reset,
        closed,
    })
}
