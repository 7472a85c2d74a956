//! # Kiosk CLI Library
//!
//! Operator front end for the kiosk ledger.
//!
//! ## Module Organization
//! ```text
//! kiosk_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions, confirmation prompt
//! ├── config.rs       ◄─── KioskConfig (TOML + env)
//! ├── error.rs        ◄─── ApiError returned by every command
//! ├── output.rs       ◄─── Text rendering
//! ├── state/
//! │   └── ledger.rs   ◄─── LedgerState: mutate → persist
//! └── commands/
//!     ├── product.rs  ◄─── add/restock, hide, restore, delete, list
//!     ├── sale.rs     ◄─── sales, sale targets
//!     ├── day.rs      ◄─── profit, new day
//!     └── backup.rs   ◄─── JSON export
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod state;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{confirm, Cli, Command};
use commands::{backup, day, product, sale};
use config::KioskConfig;
use error::ApiError;
use kiosk_db::{Database, DbConfig, ProductRepository};
use output::Printer;
use state::LedgerState;

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - Default: warnings only
/// - `RUST_LOG=kiosk=debug` - every operation and its outcome
/// - `RUST_LOG=debug` - include sqlx
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,sqlx=error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves configuration: `--config` must load cleanly; the default file
/// falls back to defaults with a warning. `--db` wins over everything.
pub fn resolve_config(cli: &Cli) -> Result<KioskConfig, ApiError> {
    let mut config = match &cli.config {
        Some(path) => KioskConfig::load(Some(path.clone()))?,
        None => KioskConfig::load_or_default(None),
    };
    if let Some(db) = &cli.db {
        config.storage.db_path = Some(db.clone());
    }
    Ok(config)
}

/// Runs one command end to end.
///
/// ## Startup Sequence
/// ```text
/// 1. Resolve configuration (defaults → file → env → flags)
/// 2. Open the SQLite file, apply migrations
/// 3. Load the ledger (unreadable data → empty ledger + warning)
/// 4. Dispatch the command, print the result
/// 5. Close the pool
/// ```
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let config = resolve_config(&cli)?;
    let db_path = config.database_path()?;
    info!(path = %db_path.display(), "Opening kiosk database");

    let db = Database::new(DbConfig::new(db_path)).await?;
    let mut state = LedgerState::open(db.products()).await;

    let result = dispatch(&cli, &config, &mut state).await;

    if state.has_unsaved_changes() {
        tracing::warn!("Exiting with changes that were not saved");
    }
    db.close().await;
    result
}

async fn dispatch(
    cli: &Cli,
    config: &KioskConfig,
    state: &mut LedgerState<ProductRepository>,
) -> Result<(), ApiError> {
    let printer = Printer::new(config.currency_symbol());
    let json = cli.json;

    match &cli.command {
        Command::Add {
            name,
            buying_price,
            selling_price,
            quantity,
        } => {
            let result =
                product::add_product(state, name, buying_price, selling_price, quantity).await?;
            emit(json, &result, || printer.added(&result))
        }

        Command::Sell { id, quantity } => {
            let receipt = sale::record_sale(state, id, quantity).await?;
            emit(json, &receipt, || printer.receipt(&receipt))
        }

        Command::Targets => {
            let targets = sale::sale_targets(state);
            emit(json, &targets, || printer.targets(&targets))
        }

        Command::Hide { id } => {
            let hidden = product::hide_product(state, id).await?;
            emit(json, &hidden, || printer.product_status("Hid", &hidden))
        }

        Command::Restore { id } => {
            let restored = product::restore_product(state, id).await?;
            emit(json, &restored, || printer.product_status("Restored", &restored))
        }

        Command::Delete { id, yes } => {
            let Some(target) = state.ledger().get(id).map(product::ProductDto::from) else {
                eprintln!("No product with id {}; nothing deleted.", id);
                return Ok(());
            };
            let question = format!("Delete {} permanently?", target.name);
            if !yes && !ask(&question)? {
                eprintln!("Cancelled.");
                return Ok(());
            }
            let deleted = product::delete_product(state, id).await?;
            emit(json, &deleted, || printer.product_status("Deleted", &target))
        }

        Command::NewDay { yes } => {
            if !yes && !ask("Start a new day? Today's sold counts will be cleared.")? {
                eprintln!("Cancelled.");
                return Ok(());
            }
            let result = day::start_new_day(state).await?;
            emit(json, &result, || printer.new_day(&result))
        }

        Command::List(args) => {
            let products = product::list_products(state, args.filter());
            emit(json, &products, || printer.product_table(&products))
        }

        Command::Profit => {
            let summary = day::profit_summary(state);
            emit(json, &summary, || printer.profit(&summary))
        }

        Command::Backup { out } => {
            let path = out.clone().unwrap_or_else(|| config.backup_path());
            let report = backup::export_backup(state, &path, Utc::now())?;
            emit(json, &report, || printer.backup(&report))
        }
    }
}

/// Prints `value` as JSON, or the text from `text`.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<(), ApiError> {
    if json {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(format!("Could not encode output: {}", e)))?;
        println!("{}", rendered);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn ask(question: &str) -> Result<bool, ApiError> {
    confirm(question, std::io::stdin().lock(), std::io::stderr())
        .map_err(|e| ApiError::internal(format!("Could not read confirmation: {}", e)))
}
