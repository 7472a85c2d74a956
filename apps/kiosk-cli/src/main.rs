//! Kiosk command-line entry point.

use std::process::ExitCode;

use clap::Parser;
use kiosk_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    kiosk_cli::init_tracing();

    match kiosk_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::FAILURE
        }
    }
}
