//! Floating Cart CLI - inspect and edit a persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (repeat to add more units)
//! cart-cli add --id sku-1 --title "Pineapple" --price 4.99
//!
//! # Adjust quantities
//! cart-cli increment sku-1
//! cart-cli decrement sku-1
//!
//! # Print the floating cart badge, or the full cart
//! cart-cli show
//! cart-cli open
//!
//! # Delete the saved cart
//! cart-cli reset
//! ```
//!
//! Storage location, slot key and currency come from `CART_STORAGE_DIR`,
//! `CART_STORAGE_KEY` and `CART_CURRENCY` (or a `.env` file), and can be
//! overridden with flags.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use floating_cart::CartConfig;
use floating_cart_core::CurrencyCode;
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(author, version, about = "Floating Cart CLI tools")]
struct Cli {
    /// Directory holding the saved cart
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Key of the saved cart slot
    #[arg(long, global = true)]
    key: Option<String>,

    /// Currency used to format totals (USD, EUR, GBP, CAD, AUD, BRL)
    #[arg(long, global = true)]
    currency: Option<CurrencyCode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add {
        /// Product id (a random id is generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Product title
        #[arg(short, long)]
        title: String,

        /// Product image URL
        #[arg(short, long, default_value = "")]
        image_url: String,

        /// Unit price
        #[arg(short, long)]
        price: Decimal,
    },
    /// Add one unit to a line already in the cart
    Increment {
        /// Product id
        id: String,
    },
    /// Remove one unit from a line (never below 1)
    Decrement {
        /// Product id
        id: String,
    },
    /// Print the floating cart badge
    Show,
    /// Open the cart: print every line
    Open,
    /// Delete the saved cart
    Reset,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "floating_cart=info,cart_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.key {
        config.storage_key = key;
    }
    if let Some(currency) = cli.currency {
        config.currency = currency;
    }

    match cli.command {
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => {
            let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            commands::cart::add(&config, &id, &title, &image_url, price).await?;
        }
        Commands::Increment { id } => commands::cart::increment(&config, &id).await?,
        Commands::Decrement { id } => commands::cart::decrement(&config, &id).await?,
        Commands::Show => commands::cart::show(&config).await,
        Commands::Open => commands::cart::open(&config).await,
        Commands::Reset => commands::cart::reset(&config).await?,
    }
    Ok(())
}
