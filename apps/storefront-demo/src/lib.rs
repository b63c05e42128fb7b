//! # storefront-demo
//!
//! Drives a [`CartStore`] through a short shopping session and prints what
//! the storefront views would render at each step.
//!
//! ## Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize logging ─────────► tracing-subscriber, RUST_LOG          │
//! │  2. Load configuration ─────────► storefront.toml + STOREFRONT_* env    │
//! │  3. Retrieve products ──────────► static payload or --catalog file      │
//! │  4. Browse categories ──────────► one page per category                 │
//! │  5. Shop ───────────────────────► add, add again, step quantity         │
//! │  6. Remove with delay ──────────► basket shows "(removing)" then drops  │
//! │  7. Print the final snapshot as JSON                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod views;

use std::path::PathBuf;

use clap::Parser;
use storefront_core::{CatalogStatus, Direction};
use storefront_store::{
    CartStore, ConfiguredCatalog, RemovalOutcome, StoreConfig, StoreEvent, StoreResult,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "storefront-demo", version, about = "Storefront cart demo")]
pub struct Args {
    /// Path to storefront.toml (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON product catalog to load instead of the built-in one
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

/// Initializes tracing.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug logs
/// - `RUST_LOG=storefront_store=trace` - Trace the store only
/// - Default: INFO, DEBUG for the storefront crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt().with_env_filter(filter).finish()
}

/// Resolves the configuration, letting `--catalog` win over file and env.
pub fn resolve_config(args: &Args) -> StoreResult<StoreConfig> {
    let mut config = StoreConfig::load(args.config.clone())?;
    if let Some(path) = &args.catalog {
        config.catalog.path = Some(path.clone());
    }
    Ok(config)
}

/// Runs the scripted session.
pub async fn run(args: Args) -> StoreResult<()> {
    info!("Starting storefront demo");

    let config = resolve_config(&args)?;
    let store = CartStore::from_config(&config);
    spawn_event_logger(&store);

    let source = ConfiguredCatalog::from_settings(&config.catalog);
    if store.retrieve_products(&source).await? != CatalogStatus::Ready {
        if let Some(banner) = views::render_catalog_status(&store.snapshot()) {
            println!("{}", banner);
        }
        return Ok(());
    }

    // Browse
    for category in store.category_names() {
        let products = store.products_in_category(&category);
        print!("{}", views::render_category(&category, &products, &config));
    }
    println!();

    // Shop: the first product twice, then the first of every other category.
    let catalog = store.catalog();
    let Some(first) = catalog.first() else {
        println!("The catalog is empty");
        return Ok(());
    };
    store.add_to_cart(first)?;
    store.add_to_cart(first)?;
    for category in store.category_names() {
        if let Some(product) = store.products_in_category(&category).first() {
            if store.find_line(&product.name).is_none() {
                store.add_to_cart(product)?;
            }
        }
    }
    print!("{}", views::render_basket(&store.snapshot(), &config));

    store.change_quantity(0, Direction::Decrease)?;
    println!("\nAfter stepping {} down:", first.name);
    print!("{}", views::render_basket(&store.snapshot(), &config));

    // Remove the last line with the pending window.
    let last = store.lines().len().saturating_sub(1);
    let pending = store.remove_line_with_delay(last)?;
    println!("\nRemoving:");
    print!("{}", views::render_basket(&store.snapshot(), &config));

    match pending.completed().await? {
        RemovalOutcome::Removed(line) => println!("\nRemoved {}:", line.name),
        outcome => warn!(?outcome, "Deferred removal did not remove the line"),
    }
    print!("{}", views::render_basket(&store.snapshot(), &config));

    match serde_json::to_string_pretty(&store.snapshot()) {
        Ok(json) => println!("\n{}", json),
        Err(e) => warn!(error = %e, "Unable to serialize snapshot"),
    }

    info!(
        items = store.cart_count(),
        total = %config.format_currency(store.cart_total()),
        "Session complete"
    );
    Ok(())
}

/// Logs every store event until the store is dropped.
fn spawn_event_logger(store: &CartStore) {
    let mut events = store.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event logger lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });
}

fn log_event(event: &StoreEvent) {
    debug!(line_id = ?event.line_id(), ?event, "Store event");
}
