//! Shopkeep CLI - Browse the catalog, manage the cart, and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse products
//! shopkeep products list
//! shopkeep products search lamp
//!
//! # Manage the cart
//! shopkeep cart add prod-1
//! shopkeep cart decrease prod-1
//! shopkeep cart show
//!
//! # Check out
//! shopkeep checkout summary --gift-wrap
//! shopkeep checkout submit order.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPKEEP_DATA_DIR` - Profile directory holding the persisted cart
//! - `SHOPKEEP_CATALOG_PATH` - Product listing JSON file
//! - `RUST_LOG` - Log filter (defaults to `shopkeep=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shopkeep_storefront::{AppError, StorefrontConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "shopkeep")]
#[command(author, version, about = "Shopkeep storefront CLI")]
struct Cli {
    /// Emit logs and command output as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Price and place an order
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List every product
    List,
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
    /// Search by name, manufacturer, or category
    Search {
        /// Case-insensitive search text
        query: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: String,
    },
    /// Remove one unit of a product
    Decrease {
        /// Product ID
        id: String,
    },
    /// Remove a product entirely
    Remove {
        /// Product ID
        id: String,
    },
    /// Print the quantity of a product
    Quantity {
        /// Product ID
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Show the order summary for the current cart
    Summary {
        /// Include gift wrapping
        #[arg(long)]
        gift_wrap: bool,
    },
    /// Validate a checkout form and place the order
    Submit {
        /// YAML file with the checkout form fields
        form: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.json);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed: {}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shopkeep=info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = StorefrontConfig::from_env()?;
    let mut session = commands::Session::open(config);

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list(&session)?,
            ProductsAction::Show { id } => commands::products::show(&session, &id)?,
            ProductsAction::Search { query } => commands::products::search(&session, &query)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&session),
            CartAction::Add { id } => commands::cart::add(&mut session, &id)?,
            CartAction::Decrease { id } => commands::cart::decrease(&mut session, &id),
            CartAction::Remove { id } => commands::cart::remove(&mut session, &id),
            CartAction::Quantity { id } => commands::cart::quantity(&session, &id),
            CartAction::Clear => commands::cart::clear(&mut session),
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Summary { gift_wrap } => {
                commands::checkout::summary(&session, gift_wrap);
            }
            CheckoutAction::Submit { form } => commands::checkout::submit(&mut session, &form)?,
        },
    }
    Ok(())
}
