//! CLI administration tool for short-url.
//!
//! Works directly against the store, without going through the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Look up an alias
//! cargo run --bin admin -- link show docs
//!
//! # Create an alias (prompts for the admin password)
//! cargo run --bin admin -- link create docs https://example.com/docs
//!
//! # Delete an alias
//! cargo run --bin admin -- link delete docs
//!
//! # Inspect or change the persisted listen address
//! cargo run --bin admin -- config show
//! cargo run --bin admin -- config set-addr 0.0.0.0:8000
//!
//! # Check the store connection
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (`REDIS_URL`, `REDIS_HOST`, ...). `--redis` overrides them.

use short_url::application::services::ShortLinkRegistry;
use short_url::config::{Config, mask_connection_string};
use short_url::domain::namespace::CONF_ADDR_KEY;
use short_url::domain::repositories::KeyValueStore;
use short_url::server::connect_store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};
use std::sync::Arc;

/// CLI tool for managing short-url.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Redis connection string (overrides REDIS_URL)
    #[arg(long, global = true)]
    redis: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Inspect or change stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Print the destination of an alias
    Show { alias: String },

    /// Register a new alias
    Create {
        alias: String,
        url: String,

        /// Admin password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Delete an alias
    Delete {
        alias: String,

        /// Admin password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Stored configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Show the persisted listen address
    Show,

    /// Overwrite the persisted listen address
    SetAddr { addr: String },
}

/// Store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check the store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?.with_redis_url(cli.redis);
    config.validate()?;

    let store = connect_store(&config).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, store).await?,
        Commands::Config { action } => handle_config_action(action, store.as_ref()).await?,
        Commands::Store { action } => handle_store_action(action, store.as_ref(), &config).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, store: Arc<dyn KeyValueStore>) -> Result<()> {
    let registry = ShortLinkRegistry::new(store);

    match action {
        LinkAction::Show { alias } => show_link(&registry, &alias).await?,
        LinkAction::Create {
            alias,
            url,
            password,
        } => create_link(&registry, &alias, &url, password).await?,
        LinkAction::Delete {
            alias,
            password,
            yes,
        } => delete_link(&registry, &alias, password, yes).await?,
    }

    Ok(())
}

async fn show_link(registry: &ShortLinkRegistry, alias: &str) -> Result<()> {
    let destination = registry.resolve(alias).await?;

    println!("  {} -> {}", format!("/{alias}").cyan(), destination.bright_white());
    Ok(())
}

/// Registers an alias, prompting for a confirmed password if none was given.
async fn create_link(
    registry: &ShortLinkRegistry,
    alias: &str,
    url: &str,
    password: Option<String>,
) -> Result<()> {
    println!("{}", "Create short link".bright_blue().bold());
    println!();

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Admin password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    let link = registry.create(alias, url, &password).await?;

    println!("{}", "✓ Short link created".green().bold());
    println!("  Alias: {}", link.short_path().cyan());
    println!("  URL:   {}", link.destination.bright_white());
    println!();
    println!(
        "{}",
        "Keep the admin password: it is the only way to delete this link.".yellow()
    );

    Ok(())
}

/// Deletes an alias after password entry and confirmation.
async fn delete_link(
    registry: &ShortLinkRegistry,
    alias: &str,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let destination = registry.resolve(alias).await?;

    println!("{}", "Delete short link".bright_blue().bold());
    println!("  {} -> {}", format!("/{alias}").cyan(), destination);
    println!();

    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Admin password").interact()?,
    };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete /{alias}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "✗ Cancelled".red());
            return Ok(());
        }
    }

    registry.delete(alias, &password).await?;

    println!("{}", "✓ Short link deleted".green().bold());
    Ok(())
}

/// Dispatches stored configuration commands.
async fn handle_config_action(action: ConfigAction, store: &dyn KeyValueStore) -> Result<()> {
    match action {
        ConfigAction::Show => match store.get(CONF_ADDR_KEY).await? {
            Some(addr) => println!("  {}: {}", CONF_ADDR_KEY.bright_white(), addr.cyan()),
            None => println!(
                "  {} is not set; the server writes its default on first start",
                CONF_ADDR_KEY.bright_white()
            ),
        },
        ConfigAction::SetAddr { addr } => {
            if !addr.contains(':') {
                anyhow::bail!("Address must be in format 'host:port', got '{}'", addr);
            }
            store.set(CONF_ADDR_KEY, &addr).await?;
            println!(
                "{} {} = {}",
                "✓".green(),
                CONF_ADDR_KEY.bright_white(),
                addr.cyan()
            );
            println!("  Restart the server to apply.");
        }
    }

    Ok(())
}

/// Dispatches store commands.
async fn handle_store_action(
    action: StoreAction,
    store: &dyn KeyValueStore,
    config: &Config,
) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!("{}", "Checking store connection".bright_blue().bold());
            println!("  Store: {}", mask_connection_string(&config.redis_url));

            if store.health_check().await {
                println!("{}", "✓ Store reachable".green().bold());
            } else {
                anyhow::bail!("Store did not answer PING");
            }
        }
    }

    Ok(())
}
