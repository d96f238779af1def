//! Last Bite CLI - Browse the catalog and price carts from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List every store and product
//! lastbite catalog
//!
//! # Only products whose name contains "蛋糕"
//! lastbite catalog --search 蛋糕
//!
//! # Two apple pies and one mousse from store 1, delivered
//! lastbite quote --store 1 --item 1=2 --item 2 --address "台北市信義區市府路1號" --confirm
//!
//! # Same cart, picked up in store
//! lastbite quote --store 1 --item 1=2 --item 2 --method self-pickup
//! ```
//!
//! # Commands
//!
//! - `catalog` - List stores, prices, discounts, and expiry labels
//! - `quote` - Build a cart and print the order summary
//!
//! # Environment Variables
//!
//! See `lastbite_storefront::config` for pricing and catalog settings.
//! `LASTBITE_LOG_FORMAT=json` switches log output to JSON.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use lastbite_core::ProductId;
use lastbite_storefront::StorefrontConfig;
use lastbite_storefront::telemetry::{self, LogFormat};

mod commands;

#[derive(Parser)]
#[command(name = "lastbite")]
#[command(author, version, about = "Last Bite storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stores and their products
    Catalog {
        /// Only show products whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only show this store
        #[arg(long)]
        store: Option<String>,
    },
    /// Price a cart from one store
    Quote {
        /// Store ID
        #[arg(short, long)]
        store: String,

        /// Product to add, as `ID` or `ID=QUANTITY` (repeatable)
        #[arg(short, long = "item", value_parser = commands::quote::parse_item, required = true)]
        items: Vec<(ProductId, i64)>,

        /// Delivery method (`delivery` or `self-pickup`)
        #[arg(short, long, default_value = "delivery")]
        method: String,

        /// Delivery address
        #[arg(short, long)]
        address: Option<String>,

        /// Validate the order as if placing it (requires an address for delivery)
        #[arg(long)]
        confirm: bool,
    },
}

fn main() {
    telemetry::init_tracing(LogFormat::from_env());

    let cli = Cli::parse();

    let result = run(cli, &mut std::io::stdout().lock());

    if let Err(e) = result {
        if e.is_integrity_violation() {
            tracing::error!(error = %e, "Catalog and cart are out of sync");
        } else {
            tracing::warn!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), commands::CliError> {
    let config = StorefrontConfig::from_env()?;
    let catalog = commands::load_catalog(&config)?;

    match cli.command {
        Commands::Catalog { search, store } => {
            commands::catalog::list(
                out,
                &catalog,
                &commands::catalog::ListOptions {
                    search: search.as_deref(),
                    store: store.as_deref(),
                    currency: config.currency,
                    now: chrono::Utc::now(),
                },
            )?;
        }
        Commands::Quote {
            store,
            items,
            method,
            address,
            confirm,
        } => {
            let request = commands::quote::QuoteRequest {
                store: store.into(),
                items,
                method,
                address,
                confirm,
            };
            commands::quote::quote(out, &catalog, &config, &request)?;
        }
    }
    Ok(())
}
