//! # Seed Data Generator
//!
//! Fills a kiosk database with a day's worth of demo vegetables.
//!
//! ## Usage
//! ```bash
//! cargo run -p kiosk-db --bin seed
//! cargo run -p kiosk-db --bin seed -- --db ./data/kiosk.db
//! cargo run -p kiosk-db --bin seed -- --reset
//! ```

use std::env;

use kiosk_core::{Ledger, Money, StockInput};
use kiosk_db::{Database, DbConfig, ProductStore};

/// (name, buying cents, selling cents, stock, sold today)
const PRODUCE: &[(&str, i64, i64, u32, u32)] = &[
    ("Tomato", 500, 800, 40, 12),
    ("Onion", 300, 450, 60, 18),
    ("Kale", 250, 400, 25, 25),
    ("Cabbage", 4000, 6000, 10, 3),
    ("Carrot", 150, 250, 80, 0),
    ("Spinach", 200, 350, 30, 7),
    ("Potato", 1200, 1500, 50, 20),
    ("Avocado", 1000, 1550, 24, 9),
    ("Green Pepper", 500, 750, 15, 0),
    ("Coriander", 50, 100, 40, 11),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kiosk_dev.db");
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--reset" => reset = true,
            "--help" | "-h" => {
                println!("Kiosk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kiosk_dev.db)");
                println!("      --reset        Replace existing products");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Kiosk Seed Data Generator");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let repo = db.products();

    let existing = repo.load().await;
    if !existing.is_empty() && !reset {
        println!("Database already has {} products", existing.len());
        println!("  Pass --reset to replace them.");
        return Ok(());
    }

    let mut ledger = Ledger::new();
    for &(name, buying, selling, stock, sold) in PRODUCE {
        let outcome = ledger.add_or_restock(StockInput::new(
            name,
            Money::from_cents(buying),
            Money::from_cents(selling),
            stock,
        ))?;
        if sold > 0 {
            ledger.record_sale(&outcome.product.id, sold)?;
        }
    }

    repo.save(ledger.products()).await?;

    println!("Seeded {} products", ledger.len());
    println!("  Hidden (sold out): {}", ledger.list_hidden().len());
    println!("  Today's profit:    {}", ledger.compute_profit());

    db.close().await;
    Ok(())
}
