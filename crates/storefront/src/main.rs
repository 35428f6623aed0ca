//! GameHub - command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog, optionally by genre
//! gamehub products --genre Action
//!
//! # Show one product and add it to the cart
//! gamehub product <ID>
//! gamehub add <ID> --quantity 2
//!
//! # Review the cart, then place the order
//! gamehub checkout
//! gamehub checkout --place
//!
//! # Show the order once; this also empties the cart
//! gamehub confirmation
//! ```
//!
//! Page output goes to stdout, logs to stderr. See [`gamehub_storefront::config`]
//! for environment variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::Utc;
use clap::{Parser, Subcommand};
use gamehub_core::Money;
use gamehub_storefront::config::{LogFormat, StorefrontConfig};
use gamehub_storefront::error::{AppError, Result};
use gamehub_storefront::pages::{checkout, confirmation, home, product};
use gamehub_storefront::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gamehub")]
#[command(author, version, about = "GameHub storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in the catalog
    Products {
        /// Only show products of this genre
        #[arg(short, long)]
        genre: Option<String>,
    },
    /// Show a product's details
    Product {
        /// Product id
        id: String,
    },
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Show the cart
    Cart,
    /// Empty the cart
    Clear,
    /// Review the cart, or place the order with --place
    Checkout {
        /// Place the order
        #[arg(long)]
        place: bool,
    },
    /// Show the last placed order
    Confirmation,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match StorefrontConfig::from_env() {
        Ok(config) => {
            init_tracing(config.log_format);
            match AppState::new(config) {
                Ok(state) => run(cli.command, &state).await,
                Err(e) => Err(e),
            }
        }
        Err(e) => {
            init_tracing(LogFormat::default());
            Err(AppError::from(e))
        }
    };

    match result {
        Ok(output) => print_page(&output),
        Err(e) => {
            e.report();
            print_error(&e);
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_page(output: &str) {
    println!("{}", output.trim_end());
}

#[allow(clippy::print_stderr)]
fn print_error(err: &AppError) {
    eprintln!("{}", err.user_message());
}

/// Initialize tracing to stderr with `EnvFilter`.
///
/// Defaults to warnings only if `RUST_LOG` is not set.
fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gamehub_storefront=warn,gamehub_core=warn".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run(command: Commands, state: &AppState) -> Result<String> {
    match command {
        Commands::Products { genre } => home::show(state, genre.as_deref()).await,
        Commands::Product { id } => product::show(state, &id).await,
        Commands::Add { id, quantity } => {
            let cart = product::add_to_cart(state, &id, quantity).await?;
            Ok(format!(
                "{}\nItems in cart: {}\nGo to checkout: gamehub checkout",
                product::ADDED_TO_CART,
                cart.item_count()
            ))
        }
        Commands::Remove { id } => checkout::remove(state, &id),
        Commands::Cart => checkout::show(state),
        Commands::Clear => {
            state.carts().clear_cart()?;
            Ok("Cart cleared.".to_string())
        }
        Commands::Checkout { place: false } => checkout::show(state),
        Commands::Checkout { place: true } => {
            let order = checkout::place_order(state, Utc::now())?;
            Ok(format!(
                "Order placed. Total: {}\nView it: gamehub confirmation",
                Money::new(order.total)
            ))
        }
        Commands::Confirmation => confirmation::show_and_acknowledge(state),
    }
}
