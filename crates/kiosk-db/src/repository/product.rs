//! # Product Repository
//!
//! Loads and saves the whole product list as one JSON document.
//!
//! ## Storage Layout
//! ```text
//! ┌──────────────────────┬────────────────────────────────┬────────────────┐
//! │ key                  │ value                          │ updated_at     │
//! ├──────────────────────┼────────────────────────────────┼────────────────┤
//! │ kiosk_products_v1    │ [{"id":"…","name":"Tomato",…}] │ 2025-01-31T…   │
//! └──────────────────────┴────────────────────────────────┴────────────────┘
//! ```
//!
//! ## Load Rules
//! - No row: empty list
//! - Row that fails to parse, or whose records break a ledger rule: empty
//!   list plus a warning. The row is left in place until the next save
//!   overwrites it.

use chrono::Utc;
use kiosk_core::{Ledger, Product};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Storage key of the product document.
pub const PRODUCTS_KEY: &str = "kiosk_products_v1";

// =============================================================================
// Store Trait
// =============================================================================

/// Durable home of the product list.
///
/// `load` never fails: a missing or unreadable document yields an empty
/// list. `save` replaces the stored list with `products`, in order.
#[allow(async_fn_in_trait)]
pub trait ProductStore {
    async fn load(&self) -> Vec<Product>;

    async fn save(&self, products: &[Product]) -> DbResult<()>;
}

// =============================================================================
// Document Codec
// =============================================================================

/// Encodes the product list as the stored JSON array.
pub fn encode_products(products: &[Product]) -> DbResult<String> {
    Ok(serde_json::to_string(products)?)
}

/// Decodes and validates a stored JSON array.
///
/// Missing `soldQuantity`/`hidden` fields default here. Any record failing
/// validation rejects the whole document.
pub fn decode_products(raw: &str) -> DbResult<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_str(raw)?;
    let ledger = Ledger::from_products(products)
        .map_err(|e| DbError::CorruptData(e.to_string()))?;
    Ok(ledger.into_products())
}

// =============================================================================
// Repository
// =============================================================================

/// SQLite-backed [`ProductStore`].
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    key: String,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_key(pool, PRODUCTS_KEY)
    }

    /// Repository over a different storage key.
    pub fn with_key(pool: SqlitePool, key: impl Into<String>) -> Self {
        ProductRepository {
            pool,
            key: key.into(),
        }
    }

    /// Raw stored document, if any.
    pub async fn load_raw(&self) -> DbResult<Option<String>> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
                .bind(&self.key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(raw)
    }

    /// Writes a raw document, bypassing encoding.
    pub async fn save_raw(&self, raw: &str) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&self.key)
        .bind(raw)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Like [`ProductStore::load`], but reports why a document was rejected.
    pub async fn try_load(&self) -> DbResult<Vec<Product>> {
        match self.load_raw().await? {
            Some(raw) => decode_products(&raw),
            None => {
                debug!(key = %self.key, "No stored products");
                Ok(Vec::new())
            }
        }
    }

}

impl ProductStore for ProductRepository {
    async fn load(&self) -> Vec<Product> {
        match self.try_load().await {
            Ok(products) => {
                debug!(count = products.len(), "Loaded products");
                products
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Ignoring unreadable product data, starting empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, products: &[Product]) -> DbResult<()> {
        debug!(count = products.len(), "Saving products");
        let raw = encode_products(products)?;
        self.save_raw(&raw).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use kiosk_core::{Money, StockInput};

    async fn repo() -> ProductRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add_or_restock(StockInput::new(
                "Tomato",
                Money::from_cents(500),
                Money::from_cents(800),
                20,
            ))
            .unwrap();
        let kale = ledger
            .add_or_restock(StockInput::new(
                "Kale",
                Money::from_cents(250),
                Money::from_cents(400),
                1,
            ))
            .unwrap();
        ledger.record_sale(&kale.product.id, 1).unwrap();
        ledger
    }

    #[tokio::test]
    async fn test_load_without_document_is_empty() {
        let repo = repo().await;
        assert!(repo.load().await.is_empty());
        assert_eq!(repo.load_raw().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order_and_fields() {
        let repo = repo().await;
        let ledger = sample_ledger();

        repo.save(ledger.products()).await.unwrap();
        let loaded = repo.load().await;

        assert_eq!(loaded, ledger.products());
        assert!(loaded[1].hidden);
        assert_eq!(loaded[1].sold_quantity, 1);
    }

    #[tokio::test]
    async fn test_max_price_survives_reload() {
        let repo = repo().await;
        let mut ledger = Ledger::new();
        let max = Money::from_cents(kiosk_core::MAX_PRICE_CENTS);
        ledger
            .add_or_restock(StockInput::new(
                "Tomato",
                Money::from_cents(500),
                Money::from_cents(800),
                20,
            ))
            .unwrap();
        ledger
            .add_or_restock(StockInput::new("Gold", Money::from_cents(100), max, 1))
            .unwrap();
        ledger
            .add_or_restock(StockInput::new("Silver", max - Money::from_cents(1), max, 1))
            .unwrap();

        repo.save(ledger.products()).await.unwrap();

        let loaded = repo.try_load().await.unwrap();
        assert_eq!(loaded, ledger.products());
        assert_eq!(loaded[1].selling_price, max);
        assert_eq!(loaded[2].buying_price.cents(), kiosk_core::MAX_PRICE_CENTS - 1);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_document() {
        let repo = repo().await;
        repo.save(sample_ledger().products()).await.unwrap();
        repo.save(&[]).await.unwrap();

        assert!(repo.load().await.is_empty());
        assert_eq!(repo.load_raw().await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_stored_document_uses_camel_case() {
        let repo = repo().await;
        repo.save(sample_ledger().products()).await.unwrap();

        let raw = repo.load_raw().await.unwrap().unwrap();
        assert!(raw.contains("\"buyingPrice\":5"));
        assert!(raw.contains("\"soldQuantity\":1"));
    }

    #[tokio::test]
    async fn test_missing_counters_default_on_load() {
        let repo = repo().await;
        repo.save_raw(
            r#"[{"id":"legacy-1","name":"Onion","buyingPrice":1,"sellingPrice":1.5,"quantity":9}]"#,
        )
        .await
        .unwrap();

        let loaded = repo.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "legacy-1");
        assert_eq!(loaded[0].sold_quantity, 0);
        assert!(!loaded[0].hidden);
        assert_eq!(loaded[0].selling_price.cents(), 150);
    }

    #[tokio::test]
    async fn test_corrupt_documents_load_empty() {
        let repo = repo().await;
        let corrupt = [
            "not json",
            r#"{"id":"x"}"#,
            r#"[{"id":"a","name":"Kale","buyingPrice":2,"sellingPrice":4,"quantity":-1}]"#,
            r#"[{"id":"a","name":"","buyingPrice":2,"sellingPrice":4,"quantity":1}]"#,
            r#"[{"id":"a","name":"Kale","buyingPrice":2,"sellingPrice":4,"quantity":1},
                {"id":"b","name":"KALE","buyingPrice":2,"sellingPrice":4,"quantity":1}]"#,
        ];

        for raw in corrupt {
            repo.save_raw(raw).await.unwrap();
            assert!(repo.load().await.is_empty(), "accepted: {raw}");
            assert!(repo.try_load().await.is_err());
        }
    }

    #[tokio::test]
    async fn test_duplicate_names_report_corrupt_data() {
        let repo = repo().await;
        repo.save_raw(
            r#"[{"id":"a","name":"Kale","buyingPrice":2,"sellingPrice":4,"quantity":1},
                {"id":"b","name":"kale","buyingPrice":2,"sellingPrice":4,"quantity":1}]"#,
        )
        .await
        .unwrap();

        assert!(matches!(
            repo.try_load().await,
            Err(DbError::CorruptData(_))
        ));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let main = db.products();
        let other = ProductRepository::with_key(db.pool().clone(), "other");

        main.save(sample_ledger().products()).await.unwrap();
        assert!(other.load().await.is_empty());

        other.save(&[]).await.unwrap();
        assert_eq!(main.load().await.len(), sample_ledger().len());
    }

    #[tokio::test]
    async fn test_save_after_close_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        db.close().await;

        assert!(repo.save(sample_ledger().products()).await.is_err());
        assert!(repo.load().await.is_empty());
    }
}
