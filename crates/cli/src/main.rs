//! Teezy CLI - order from a Teezy tea shop in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the menu
//! teezy menu
//!
//! # Build a cart
//! teezy cart add 3
//! teezy cart change 3 -1
//! teezy cart show
//!
//! # Place the order for pickup at 15:30 today
//! teezy order --pickup 15:30 --discount TEA10
//!
//! # Reorder the usual, replacing the cart without asking
//! teezy --yes favorite load
//! ```
//!
//! # Commands
//!
//! - `menu` - List menu items
//! - `cart` - Show and edit the persisted cart
//! - `favorite` - Load or save the favorite order
//! - `order` - Submit the cart
//! - `loyalty` - Show the points balance
//! - `promotions` - List promotions and discount codes
//! - `history` - List past orders
//!
//! Configuration comes from `TEEZY_*` environment variables (see
//! `teezy_client::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use teezy_client::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "teezy")]
#[command(author, version, about = "Teezy tea shop client")]
struct Cli {
    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu items
    Menu,
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Load or save the favorite order
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Submit the cart as an order
    Order {
        /// Pickup time, `HH:MM` for today or `YYYY-MM-DD HH:MM`
        #[arg(short, long, conflicts_with = "asap")]
        pickup: Option<String>,

        /// Pick up at the earliest time the shop accepts
        #[arg(long)]
        asap: bool,

        /// Discount code
        #[arg(short, long)]
        discount: Option<String>,
    },
    /// Show the loyalty points balance
    Loyalty,
    /// List promotions and discount codes
    Promotions,
    /// List past orders
    History,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add one unit of a menu item
    Add {
        /// Menu item ID
        item_id: i32,
    },
    /// Change a line's quantity by a signed amount
    Change {
        /// Menu item ID
        item_id: i32,

        /// Amount to add, negative to remove
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Replace the cart with the favorite order
    Load,
    /// Save the cart as the favorite order
    Save {
        /// Optional name for the favorite
        #[arg(short, long)]
        name: Option<String>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
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

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output stays clean on stdout
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "teezy_cli=info,teezy_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = commands::open_session(config, cli.yes);

    match cli.command {
        Commands::Menu => commands::menu::list(&mut session).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&session)?,
            CartAction::Add { item_id } => {
                commands::cart::add(&mut session, item_id.into()).await?;
            }
            CartAction::Change { item_id, delta } => {
                commands::cart::change(&mut session, item_id.into(), delta)?;
            }
            CartAction::Clear => commands::cart::clear(&mut session)?,
        },
        Commands::Favorite { action } => match action {
            FavoriteAction::Load => commands::favorite::load(&mut session).await?,
            FavoriteAction::Save { name } => commands::favorite::save(&session, name).await?,
        },
        Commands::Order {
            pickup,
            asap,
            discount,
        } => {
            commands::order::submit(&mut session, pickup.as_deref(), asap, discount).await?;
        }
        Commands::Loyalty => commands::loyalty::balance(&mut session).await?,
        Commands::Promotions => commands::promotions::list(&session).await?,
        Commands::History => commands::order::history(&session).await?,
    }
    Ok(())
}
