//! Sajid Garments CLI - browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! garments products
//!
//! # Add two medium black shirts, then look at the cart
//! garments cart add 1 --size M --color '#000000' --quantity 2
//! garments cart show
//!
//! # Place the order with express shipping and a promo code
//! garments checkout --shipping express --promo SAVE10
//! ```
//!
//! The cart is saved under `GARMENTS_DATA_DIR` after every change and
//! restored on the next run.

#![cfg_attr(not(test), forbid(unsafe_code))]

use core::num::NonZeroU32;

use clap::{Args, Parser, Subcommand};
use garments_core::ProductId;
use garments_storefront::{AppState, Catalog, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "garments")]
#[command(author, version, about = "Sajid Garments storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Products,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// Place an order for everything in the cart
    Checkout {
        /// Shipping method (`standard`, `express`, `local-pickup`)
        #[arg(short, long)]
        shipping: Option<String>,

        /// Promo code
        #[arg(short, long)]
        promo: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show cart lines and totals
    Show,
    /// Add a product variant
    Add {
        #[command(flatten)]
        variant: VariantArgs,

        /// Number of units to add
        #[arg(short, long, default_value = "1")]
        quantity: NonZeroU32,
    },
    /// Remove a line
    Remove {
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Add one unit to a line
    Increase {
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Take one unit off a line (never below one)
    Decrease {
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Remove every line
    Clear,
}

/// Identifies a product variant.
#[derive(Args)]
struct VariantArgs {
    /// Product ID
    id: ProductId,

    /// Size, for products sold in sizes
    #[arg(short, long)]
    size: Option<String>,

    /// Color, for products sold in colors
    #[arg(short, long)]
    color: Option<String>,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "garments=info,garments_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> garments_storefront::error::Result<()> {
    let config = StorefrontConfig::from_env()?;
    let mut state = AppState::new(config, Catalog::builtin());

    match cli.command {
        Commands::Products => commands::products::list(&state),
        Commands::Cart { action } => match action {
            CartCommand::Show => commands::cart::show(&state),
            CartCommand::Add { variant, quantity } => commands::cart::add(
                &mut state,
                variant.id,
                variant.size.as_deref(),
                variant.color.as_deref(),
                quantity,
            )?,
            CartCommand::Remove { variant } => {
                let key = commands::cart::variant_key(&state, variant.id, variant.size, variant.color);
                commands::cart::remove(&mut state, key);
            }
            CartCommand::Increase { variant } => {
                let key = commands::cart::variant_key(&state, variant.id, variant.size, variant.color);
                commands::cart::increase(&mut state, key);
            }
            CartCommand::Decrease { variant } => {
                let key = commands::cart::variant_key(&state, variant.id, variant.size, variant.color);
                commands::cart::decrease(&mut state, key);
            }
            CartCommand::Clear => commands::cart::clear(&mut state),
        },
        Commands::Checkout { shipping, promo } => {
            commands::checkout::run(&mut state, shipping.as_deref(), promo.as_deref())?;
        }
    }
    Ok(())
}
