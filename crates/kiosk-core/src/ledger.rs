//! # Ledger Module
//!
//! The authoritative in-memory collection of products and every state
//! transition the kiosk supports.
//!
//! ## Product State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   add ──► Active(qty>0) ──sale to 0──► Hidden(qty=0)                   │
//! │              ▲    │                       │   ▲                         │
//! │      restock │    │ hide          restore │   │ hide                    │
//! │              │    ▼                       ▼   │                         │
//! │            Hidden(qty>0) ◄──────────── Active(qty=0)                    │
//! │                                        (visible, unsellable)           │
//! │                                                                         │
//! │   any state ──delete──► Destroyed (terminal)                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation Contract
//! Each mutating operation validates first and mutates second. A returned
//! `Err` means the ledger is exactly as it was before the call. Persisting
//! the result is the caller's job.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{generate_product_id, Product, StockInput};
use crate::validation::{validate_sale_quantity, validate_stored_product};

/// Result of [`Ledger::add_or_restock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// The product after the operation.
    pub product: Product,
    /// `true` if a new product was created, `false` if an existing one was restocked.
    pub created: bool,
}

/// Ordered collection of products (creation order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    products: Vec<Product>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Rebuilds a ledger from stored products.
    ///
    /// ## Checks
    /// - every record passes [`validate_stored_product`]
    /// - ids are unique
    /// - names are unique ignoring case
    pub fn from_products(products: Vec<Product>) -> CoreResult<Self> {
        for (i, product) in products.iter().enumerate() {
            validate_stored_product(product)?;

            let earlier = &products[..i];
            if earlier.iter().any(|p| p.id == product.id) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.clone(),
                }
                .into());
            }
            if earlier.iter().any(|p| p.name_matches(&product.name)) {
                return Err(ValidationError::Duplicate {
                    field: "product name".to_string(),
                    value: product.name.clone(),
                }
                .into());
            }
        }

        Ok(Ledger { products })
    }

    /// All products in ledger order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Consumes the ledger, yielding its products in order.
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by name, ignoring case and surrounding whitespace.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name_matches(name))
    }

    fn get_mut(&mut self, id: &str) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Adds a new product, or restocks the one whose name matches.
    ///
    /// ## Restock Semantics
    /// ```text
    /// existing: Tomato  buy 5  sell 8  qty 3  hidden
    /// input:    tomato  buy 6  sell 9  qty 10
    ///                │
    ///                ▼
    /// result:   Tomato  buy 6  sell 9  qty 13  visible
    /// ```
    /// Prices are overwritten, quantity is added, the product is un-hidden.
    /// The stored name keeps its original spelling.
    pub fn add_or_restock(&mut self, input: StockInput) -> CoreResult<AddOutcome> {
        input.validate()?;

        if let Some(index) = self.products.iter().position(|p| p.name_matches(&input.name)) {
            let existing = &self.products[index];
            let quantity = existing.quantity.checked_add(input.quantity).ok_or_else(|| {
                ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 0,
                    max: (u32::MAX - existing.quantity) as i64,
                }
            })?;

            let product = &mut self.products[index];
            product.buying_price = input.buying_price;
            product.selling_price = input.selling_price;
            product.quantity = quantity;
            product.hidden = false;

            return Ok(AddOutcome {
                product: product.clone(),
                created: false,
            });
        }

        let product = Product::new(generate_product_id(), &input);
        self.products.push(product.clone());

        Ok(AddOutcome {
            product,
            created: true,
        })
    }

    /// Records the sale of `quantity` units.
    ///
    /// Selling the last unit hides the product. Nothing ever un-hides it
    /// automatically; restock or restore does.
    pub fn record_sale(&mut self, id: &str, quantity: u32) -> CoreResult<Product> {
        let product = self.get_mut(id)?;
        validate_sale_quantity(quantity)?;

        if product.quantity < quantity {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.quantity,
                requested: quantity,
            });
        }

        let sold = product.sold_quantity.checked_add(quantity).ok_or_else(|| {
            ValidationError::OutOfRange {
                field: "sold quantity".to_string(),
                min: 0,
                max: u32::MAX as i64,
            }
        })?;

        product.quantity -= quantity;
        product.sold_quantity = sold;
        if product.quantity == 0 {
            product.hidden = true;
        }

        Ok(product.clone())
    }

    /// Hides a product. Hiding a hidden product is a no-op.
    pub fn hide(&mut self, id: &str) -> CoreResult<Product> {
        let product = self.get_mut(id)?;
        product.hidden = true;
        Ok(product.clone())
    }

    /// Makes a product visible again, whatever its stock.
    ///
    /// A zero-stock product restored this way is listed as active but is not
    /// sellable.
    pub fn restore(&mut self, id: &str) -> CoreResult<Product> {
        let product = self.get_mut(id)?;
        product.hidden = false;
        Ok(product.clone())
    }

    /// Permanently removes a product. Returns `None` if the id is unknown.
    pub fn delete(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    /// Zeroes every sold counter, hidden products included.
    ///
    /// Returns the number of products reset.
    pub fn start_new_day(&mut self) -> usize {
        for product in &mut self.products {
            product.sold_quantity = 0;
        }
        self.products.len()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// `Σ (selling - buying) × sold` over every product, at current prices.
    pub fn compute_profit(&self) -> Money {
        self.products.iter().map(Product::profit).sum()
    }

    /// Products not hidden.
    pub fn list_active(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| !p.hidden).collect()
    }

    /// Hidden products.
    pub fn list_hidden(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.hidden).collect()
    }

    /// Candidates for a sale: visible with stock.
    pub fn list_sellable(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_sellable()).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, buy: i64, sell: i64, qty: u32) -> StockInput {
        StockInput::new(name, Money::from_major(buy), Money::from_major(sell), qty)
    }

    fn ledger_with(name: &str, buy: i64, sell: i64, qty: u32) -> (Ledger, String) {
        let mut ledger = Ledger::new();
        let id = ledger.add_or_restock(input(name, buy, sell, qty)).unwrap().product.id;
        (ledger, id)
    }

    fn snapshot(ledger: &Ledger) -> String {
        serde_json::to_string(ledger.products()).unwrap()
    }

    #[test]
    fn test_add_creates_visible_product() {
        let (ledger, id) = ledger_with("Tomato", 5, 8, 20);
        let p = ledger.get(&id).unwrap();

        assert_eq!(p.name, "Tomato");
        assert_eq!(p.quantity, 20);
        assert_eq!(p.sold_quantity, 0);
        assert!(!p.hidden);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_add_twice_same_name_restocks() {
        let mut ledger = Ledger::new();
        let first = ledger.add_or_restock(input("Tomato", 5, 8, 20)).unwrap();
        let second = ledger.add_or_restock(input("tOMATO", 6, 9, 7)).unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(ledger.len(), 1);

        let p = &ledger.products()[0];
        assert_eq!(p.id, first.product.id);
        assert_eq!(p.name, "Tomato");
        assert_eq!(p.quantity, 27);
        assert_eq!(p.buying_price, Money::from_major(6));
        assert_eq!(p.selling_price, Money::from_major(9));
    }

    #[test]
    fn test_restock_unhides_and_keeps_sold_count() {
        let (mut ledger, id) = ledger_with("Onion", 3, 5, 4);
        ledger.record_sale(&id, 4).unwrap();
        assert!(ledger.get(&id).unwrap().hidden);

        ledger.add_or_restock(input("onion", 3, 5, 10)).unwrap();
        let p = ledger.get(&id).unwrap();
        assert!(!p.hidden);
        assert_eq!(p.quantity, 10);
        assert_eq!(p.sold_quantity, 4);
    }

    #[test]
    fn test_restock_does_not_unhide_other_products() {
        let (mut ledger, kale) = ledger_with("Kale", 1, 2, 1);
        ledger.record_sale(&kale, 1).unwrap();
        ledger.add_or_restock(input("Onion", 3, 5, 10)).unwrap();

        assert!(ledger.get(&kale).unwrap().hidden);
    }

    #[test]
    fn test_add_rejects_invalid_input_without_mutation() {
        let (mut ledger, _) = ledger_with("Tomato", 5, 8, 20);
        let before = snapshot(&ledger);

        let blank = ledger.add_or_restock(input("   ", 5, 8, 1));
        assert!(matches!(blank, Err(CoreError::Validation(ValidationError::Required { .. }))));

        let negative = ledger.add_or_restock(StockInput::new(
            "Tomato",
            Money::from_cents(-1),
            Money::from_major(8),
            1,
        ));
        assert!(matches!(negative, Err(CoreError::Validation(_))));

        assert_eq!(snapshot(&ledger), before);
    }

    #[test]
    fn test_restock_overflow_is_rejected() {
        let (mut ledger, id) = ledger_with("Rice", 1, 2, u32::MAX);
        let before = snapshot(&ledger);

        let result = ledger.add_or_restock(input("Rice", 9, 9, 1));
        assert!(matches!(result, Err(CoreError::Validation(ValidationError::OutOfRange { .. }))));
        assert_eq!(snapshot(&ledger), before);
        assert_eq!(ledger.get(&id).unwrap().buying_price, Money::from_major(1));
    }

    #[test]
    fn test_two_sales_equal_one_double_sale() {
        let (mut a, a_id) = ledger_with("Mango", 10, 15, 10);
        let (mut b, b_id) = ledger_with("Mango", 10, 15, 10);

        a.record_sale(&a_id, 3).unwrap();
        a.record_sale(&a_id, 3).unwrap();
        b.record_sale(&b_id, 6).unwrap();

        let (pa, pb) = (a.get(&a_id).unwrap(), b.get(&b_id).unwrap());
        assert_eq!(pa.quantity, pb.quantity);
        assert_eq!(pa.sold_quantity, pb.sold_quantity);
        assert_eq!(pa.quantity, 4);
        assert_eq!(pa.sold_quantity, 6);
    }

    #[test]
    fn test_selling_exact_stock_hides_product() {
        let (mut ledger, id) = ledger_with("Avocado", 10, 20, 5);
        let p = ledger.record_sale(&id, 5).unwrap();

        assert_eq!(p.quantity, 0);
        assert!(p.hidden);
        assert!(ledger.list_active().is_empty());
        assert_eq!(ledger.list_hidden().len(), 1);
    }

    #[test]
    fn test_sale_errors_leave_ledger_unchanged() {
        let (mut ledger, id) = ledger_with("Tomato", 5, 8, 20);
        let before = snapshot(&ledger);

        assert_eq!(
            ledger.record_sale("nope", 1),
            Err(CoreError::ProductNotFound("nope".to_string()))
        );
        assert!(matches!(
            ledger.record_sale(&id, 0),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert_eq!(
            ledger.record_sale(&id, 21),
            Err(CoreError::InsufficientStock {
                name: "Tomato".to_string(),
                available: 20,
                requested: 21,
            })
        );

        assert_eq!(snapshot(&ledger), before);
    }

    #[test]
    fn test_unknown_id_reported_before_quantity() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.record_sale("ghost", 0),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_profit_counts_margin_times_sold() {
        let mut ledger = Ledger::new();
        let a = ledger.add_or_restock(input("Beans", 10, 15, 50)).unwrap().product.id;
        let b = ledger.add_or_restock(input("Salt", 7, 7, 50)).unwrap().product.id;

        let start = ledger.compute_profit();
        ledger.record_sale(&a, 4).unwrap();
        assert_eq!(ledger.compute_profit() - start, Money::from_major(5 * 4));

        ledger.record_sale(&b, 9).unwrap();
        assert_eq!(ledger.compute_profit(), Money::from_major(20));
    }

    #[test]
    fn test_price_above_cap_is_rejected() {
        let mut ledger = Ledger::new();
        let gold = StockInput::new(
            "Gold",
            Money::zero(),
            Money::from_cents(crate::MAX_PRICE_CENTS + 1),
            10,
        );

        assert!(matches!(
            ledger.add_or_restock(gold),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_profit_at_max_price_does_not_overflow() {
        let max = Money::from_cents(crate::MAX_PRICE_CENTS);
        let mut ledger = Ledger::new();
        let gold = ledger
            .add_or_restock(StockInput::new("Gold", Money::zero(), max, u32::MAX))
            .unwrap()
            .product
            .id;

        ledger.record_sale(&gold, 2).unwrap();
        assert_eq!(ledger.compute_profit(), max * 2);

        ledger.record_sale(&gold, u32::MAX - 2).unwrap();
        assert_eq!(ledger.compute_profit().cents(), i64::MAX);
    }

    #[test]
    fn test_profit_includes_hidden_products_and_current_prices() {
        let (mut ledger, id) = ledger_with("Milk", 50, 60, 2);
        ledger.record_sale(&id, 2).unwrap();
        assert!(ledger.get(&id).unwrap().hidden);
        assert_eq!(ledger.compute_profit(), Money::from_major(20));

        // Price change applies retroactively to today's count
        ledger.add_or_restock(input("Milk", 50, 70, 1)).unwrap();
        assert_eq!(ledger.compute_profit(), Money::from_major(40));
    }

    #[test]
    fn test_start_new_day_only_zeroes_sold_counts() {
        let mut ledger = Ledger::new();
        let a = ledger.add_or_restock(input("Eggs", 12, 15, 30)).unwrap().product.id;
        let b = ledger.add_or_restock(input("Bread", 50, 60, 2)).unwrap().product.id;
        ledger.record_sale(&a, 10).unwrap();
        ledger.record_sale(&b, 2).unwrap();
        ledger.hide(&a).unwrap();

        let before = ledger.clone();
        assert_eq!(ledger.start_new_day(), 2);

        for (old, new) in before.products().iter().zip(ledger.products()) {
            assert_eq!(new.sold_quantity, 0);
            let mut expected = old.clone();
            expected.sold_quantity = 0;
            assert_eq!(new, &expected);
        }
        assert!(ledger.compute_profit().is_zero());
    }

    #[test]
    fn test_tomato_scenario() {
        let (mut ledger, id) = ledger_with("Tomato", 5, 8, 20);
        ledger.record_sale(&id, 20).unwrap();

        let p = ledger.get(&id).unwrap();
        assert_eq!(p.quantity, 0);
        assert!(p.hidden);
        assert_eq!(p.sold_quantity, 20);
        assert_eq!(p.profit(), Money::from_major(60));

        let restored = ledger.restore(&id).unwrap();
        assert!(!restored.hidden);
        assert_eq!(restored.quantity, 0);
        assert_eq!(ledger.list_active().len(), 1);
        assert!(ledger.list_sellable().is_empty());
    }

    #[test]
    fn test_hide_and_restore_are_idempotent() {
        let (mut ledger, id) = ledger_with("Cabbage", 20, 30, 5);

        ledger.hide(&id).unwrap();
        ledger.hide(&id).unwrap();
        assert_eq!(ledger.list_hidden().len(), 1);
        assert!(ledger.list_sellable().is_empty());
        assert_eq!(ledger.get(&id).unwrap().quantity, 5);

        ledger.restore(&id).unwrap();
        ledger.restore(&id).unwrap();
        assert_eq!(ledger.list_sellable().len(), 1);

        assert!(matches!(ledger.hide("x"), Err(CoreError::ProductNotFound(_))));
        assert!(matches!(ledger.restore("x"), Err(CoreError::ProductNotFound(_))));
    }

    #[test]
    fn test_delete_then_readd_creates_fresh_product() {
        let (mut ledger, id) = ledger_with("Sugar", 100, 120, 10);
        ledger.record_sale(&id, 3).unwrap();

        let removed = ledger.delete(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(ledger.list_active().iter().all(|p| p.id != id));
        assert!(ledger.list_hidden().iter().all(|p| p.id != id));
        assert!(ledger.delete(&id).is_none());

        let again = ledger.add_or_restock(input("sugar", 100, 120, 5)).unwrap();
        assert!(again.created);
        assert_ne!(again.product.id, id);
        assert_eq!(again.product.sold_quantity, 0);
    }

    #[test]
    fn test_lists_keep_ledger_order() {
        let mut ledger = Ledger::new();
        let names = ["A", "B", "C", "D"];
        let ids: Vec<String> = names
            .iter()
            .map(|n| ledger.add_or_restock(input(n, 1, 2, 1)).unwrap().product.id)
            .collect();

        ledger.hide(&ids[1]).unwrap();
        ledger.record_sale(&ids[3], 1).unwrap();
        ledger.delete(&ids[0]);

        let active: Vec<&str> = ledger.list_active().iter().map(|p| p.name.as_str()).collect();
        let hidden: Vec<&str> = ledger.list_hidden().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(active, vec!["C"]);
        assert_eq!(hidden, vec!["B", "D"]);
        assert_eq!(ledger.find_by_name(" c ").unwrap().id, ids[2]);
    }

    #[test]
    fn test_from_products_rejects_duplicates_and_bad_records() {
        let (ledger, _) = ledger_with("Tomato", 5, 8, 20);
        let mut products = ledger.products().to_vec();

        assert!(Ledger::from_products(products.clone()).is_ok());

        let mut twin = products[0].clone();
        twin.name = "Other".to_string();
        products.push(twin);
        assert!(matches!(
            Ledger::from_products(products.clone()),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));

        products[1].id = "second".to_string();
        products[1].name = "TOMATO".to_string();
        assert!(Ledger::from_products(products.clone()).is_err());

        products[1].name = " ".to_string();
        assert!(Ledger::from_products(products).is_err());
    }
}
