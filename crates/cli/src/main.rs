//! Storefront CLI - Browse the catalog, edit the cart, check out.
//!
//! # Usage
//!
//! ```bash
//! # List products
//! cart-cli catalog
//!
//! # Add two T-shirts in size M
//! cart-cli add 1 -q 2 -v Taille=M
//!
//! # Show the cart with totals
//! cart-cli show
//!
//! # Place the order
//! cart-cli checkout --email sam@example.com --first-name Sam --last-name Lee \
//!     --address "5 Market St" --city Portland --zip-code 97201 --country USA
//! ```
//!
//! The cart persists in `CART_STORAGE_DIR` between invocations, so each
//! command runs against the cart left by the previous one.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use storefront_cart::{CartStore, FileStorage};
use storefront_core::{PaymentMethod, ProductId, ShippingDetails};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(author, version, about = "Storefront cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    Catalog,
    /// Show the cart with totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: String,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Variant selection as AXIS=OPTION (repeatable)
        #[arg(short, long = "variant", value_parser = commands::parse_variant)]
        variants: Vec<(String, String)>,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: String,
    },
    /// Set the quantity of a product in the cart
    Set {
        /// Product id
        product_id: String,

        /// New quantity
        quantity: u32,
    },
    /// Increase a product's quantity by one
    Inc {
        /// Product id
        product_id: String,
    },
    /// Decrease a product's quantity by one
    Dec {
        /// Product id
        product_id: String,
    },
    /// Empty the cart
    Clear,
    /// Place an order for the cart contents
    Checkout {
        #[command(flatten)]
        shipping: ShippingArgs,

        /// Payment method (only `credit_card` is accepted)
        #[arg(short, long, default_value = "credit_card")]
        payment: PaymentMethod,
    },
}

/// Contact and shipping fields. Blank fields are rejected at checkout.
#[derive(Args)]
struct ShippingArgs {
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    /// Street address
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    zip_code: String,
    #[arg(long, default_value = "")]
    country: String,
}

impl From<ShippingArgs> for ShippingDetails {
    fn from(args: ShippingArgs) -> Self {
        Self {
            email: args.email,
            first_name: args.first_name,
            last_name: args.last_name,
            address: args.address,
            city: args.city,
            zip_code: args.zip_code,
            country: args.country,
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_cli=info,storefront_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, &config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = catalog::load(config.catalog_path.as_deref())?;
    let mut cart = CartStore::open(FileStorage::new(&config.storage_dir));

    match cli.command {
        Commands::Catalog => commands::catalog::list(&catalog),
        Commands::Show => commands::cart::show(&cart, &catalog),
        Commands::Add {
            product_id,
            quantity,
            variants,
        } => {
            commands::cart::add(
                &mut cart,
                &catalog,
                ProductId::from(product_id),
                quantity,
                variants,
            )?;
            tracing::info!("Cart: {} item(s)", cart.item_count());
        }
        Commands::Remove { product_id } => {
            commands::cart::remove(&mut cart, &ProductId::from(product_id));
        }
        Commands::Set {
            product_id,
            quantity,
        } => commands::cart::set(&mut cart, &catalog, &ProductId::from(product_id), quantity)?,
        Commands::Inc { product_id } => {
            commands::cart::increment(&mut cart, &catalog, &ProductId::from(product_id))?;
            commands::cart::show(&cart, &catalog);
        }
        Commands::Dec { product_id } => {
            commands::cart::decrement(&mut cart, &catalog, &ProductId::from(product_id))?;
            commands::cart::show(&cart, &catalog);
        }
        Commands::Clear => commands::cart::clear(&mut cart),
        Commands::Checkout { shipping, payment } => {
            commands::checkout::run(&mut cart, &catalog, shipping.into(), payment)?;
        }
    }
    Ok(())
}
