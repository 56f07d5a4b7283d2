//! # Stock Report
//!
//! Loads an inventory and prints the active listing with the total stock.
//!
//! ## Usage
//! ```bash
//! # Default inventory (platform config dir, or built-in demo)
//! cargo run -p bestbuy-inventory --bin stock-report
//!
//! # Explicit file, JSON output
//! cargo run -p bestbuy-inventory --bin stock-report -- --config ./config/inventory.example.toml --json
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info,bestbuy=debug`). Logs go
//! to stderr so `--json` output stays clean.

use std::env;
use std::path::PathBuf;

use bestbuy_inventory::{InventoryConfig, StockReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Args {
    config_path: Option<PathBuf>,
    json: bool,
    help: bool,
    /// Arguments that were ignored, with the reason.
    warnings: Vec<String>,
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => match args.get(i + 1) {
                Some(path) => {
                    parsed.config_path = Some(PathBuf::from(path));
                    i += 1;
                }
                None => parsed
                    .warnings
                    .push(format!("Ignoring {}: missing <PATH>", args[i])),
            },
            "--json" => parsed.json = true,
            "--help" | "-h" => parsed.help = true,
            other => parsed
                .warnings
                .push(format!("Ignoring unknown argument: {}", other)),
        }
        i += 1;
    }

    parsed
}

fn print_help() {
    println!("Best Buy Stock Report");
    println!();
    println!("Usage: stock-report [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Inventory file (default: $BESTBUY_INVENTORY or platform config dir)");
    println!("      --json           Print the report as JSON");
    println!("  -h, --help           Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args);

    if args.help {
        print_help();
        return Ok(());
    }

    for warning in &args.warnings {
        eprintln!("{}", warning);
    }

    init_tracing();

    let config = InventoryConfig::load(args.config_path)?;
    let store = config.build_store()?;
    info!(store = %config.store.name, products = store.len(), "Inventory loaded");

    let report = StockReport::new(&config.store.name, &store);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bestbuy=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
