//! # Text Output
//!
//! Renders command results for the terminal. Amounts always show two
//! decimals behind the configured currency symbol (`KSh 12.50`).

use kiosk_core::Money;

use crate::commands::backup::BackupReport;
use crate::commands::day::{NewDayResult, ProfitSummary};
use crate::commands::product::{AddProductResult, ProductDto};
use crate::commands::sale::{SaleReceipt, SaleTarget};

#[derive(Debug, Clone)]
pub struct Printer {
    currency: String,
}

impl Printer {
    pub fn new(currency: impl Into<String>) -> Self {
        Printer {
            currency: currency.into(),
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with(&self.currency)
    }

    pub fn product_table(&self, products: &[ProductDto]) -> String {
        if products.is_empty() {
            return "No products.".to_string();
        }

        let name_width = products
            .iter()
            .map(|p| p.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("NAME".len());

        let mut out = format!(
            "{:<36}  {:<name_width$}  {:>14}  {:>14}  {:>6}  {:>6}  {}\n",
            "ID", "NAME", "BUY", "SELL", "STOCK", "SOLD", "STATUS",
        );
        for p in products {
            let status = if p.hidden {
                "hidden"
            } else if p.quantity == 0 {
                "out of stock"
            } else {
                "active"
            };
            out.push_str(&format!(
                "{:<36}  {:<name_width$}  {:>14}  {:>14}  {:>6}  {:>6}  {}\n",
                p.id,
                p.name,
                self.money(p.buying_price),
                self.money(p.selling_price),
                p.quantity,
                p.sold_quantity,
                status,
            ));
        }
        out.pop();
        out
    }

    pub fn added(&self, result: &AddProductResult) -> String {
        let p = &result.product;
        if result.created {
            format!(
                "Added {} ({}): buy {}, sell {}, stock {}",
                p.name,
                p.id,
                self.money(p.buying_price),
                self.money(p.selling_price),
                p.quantity
            )
        } else {
            format!(
                "Restocked {}: buy {}, sell {}, stock now {}",
                p.name,
                self.money(p.buying_price),
                self.money(p.selling_price),
                p.quantity
            )
        }
    }

    pub fn receipt(&self, receipt: &SaleReceipt) -> String {
        let mut out = format!(
            "Sold {} x {} for {} (profit {})",
            receipt.quantity,
            receipt.product.name,
            self.money(receipt.revenue),
            self.money(receipt.profit)
        );
        if receipt.sold_out {
            out.push_str(&format!("\n{} is sold out and now hidden.", receipt.product.name));
        } else {
            out.push_str(&format!("\nStock left: {}", receipt.product.quantity));
        }
        out
    }

    pub fn targets(&self, targets: &[SaleTarget]) -> String {
        if targets.is_empty() {
            return "Nothing to sell.".to_string();
        }
        targets
            .iter()
            .map(|t| format!("{}  {}", t.id, t.label))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One-line status after hide/restore/delete.
    pub fn product_status(&self, action: &str, product: &ProductDto) -> String {
        format!("{} {} ({})", action, product.name, product.id)
    }

    pub fn profit(&self, summary: &ProfitSummary) -> String {
        format!(
            "Profit today: {} ({} units across {} products)",
            self.money(summary.profit),
            summary.units_sold,
            summary.products_sold
        )
    }

    pub fn new_day(&self, result: &NewDayResult) -> String {
        format!(
            "New day started. Closed with profit {}; {} products reset.",
            self.money(result.closed.profit),
            result.products_reset
        )
    }

    pub fn backup(&self, report: &BackupReport) -> String {
        format!(
            "Backed up {} products to {}",
            report.products,
            report.path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, qty: u32, hidden: bool) -> ProductDto {
        ProductDto {
            id: format!("id-{}", name.to_lowercase()),
            name: name.to_string(),
            buying_price: Money::from_cents(500),
            selling_price: Money::from_cents(850),
            quantity: qty,
            sold_quantity: 2,
            hidden,
            sellable: !hidden && qty > 0,
            profit: Money::from_cents(700),
        }
    }

    #[test]
    fn test_money_has_two_decimals() {
        let printer = Printer::new("KSh");
        assert_eq!(printer.money(Money::from_cents(1250)), "KSh 12.50");
        assert_eq!(Printer::new("").money(Money::from_major(3)), "3.00");
    }

    #[test]
    fn test_product_table() {
        let printer = Printer::new("KSh");
        let table = printer.product_table(&[dto("Tomato", 20, false), dto("Kale", 0, true)]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("KSh 8.50"));
        assert!(lines[1].ends_with("active"));
        assert!(lines[2].ends_with("hidden"));
        assert_eq!(printer.product_table(&[]), "No products.");
    }

    #[test]
    fn test_targets_use_sale_labels() {
        let printer = Printer::new("KSh");
        let targets = [SaleTarget {
            id: "p1".into(),
            label: "Tomato (stock: 20)".into(),
        }];
        assert_eq!(printer.targets(&targets), "p1  Tomato (stock: 20)");
        assert_eq!(printer.targets(&[]), "Nothing to sell.");
    }

    #[test]
    fn test_receipt_mentions_sold_out() {
        let printer = Printer::new("KSh");
        let receipt = SaleReceipt {
            product: dto("Tomato", 0, true),
            quantity: 20,
            revenue: Money::from_major(170),
            profit: Money::from_major(70),
            sold_out: true,
        };
        let text = printer.receipt(&receipt);
        assert!(text.starts_with("Sold 20 x Tomato for KSh 170.00 (profit KSh 70.00)"));
        assert!(text.contains("sold out"));
    }
}
