//! ShopSphere CLI - drive the storefront layer from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Quick add a product to the cart (size defaults to M)
//! shopsphere cart add 42 --size L
//!
//! # Increase the quantity of cart line 7 (currently 2)
//! shopsphere cart update 7 increase --current 2
//!
//! # Wishlist and like
//! shopsphere wishlist 42
//! shopsphere like 42
//!
//! # Formatting helpers
//! shopsphere format currency 1234567.891
//! shopsphere format date 2026-10-16
//!
//! # Export a JSON table (array of string arrays) as CSV
//! shopsphere export-csv -i orders.json -o orders.csv
//!
//! # Validators
//! shopsphere validate phone 9876543210
//! shopsphere validate password 'Secret#123' --confirm 'Secret#123'
//! ```
//!
//! # Commands
//!
//! - `cart`, `wishlist`, `like` - Backend actions (need `SHOPSPHERE_BASE_URL`)
//! - `format` - Currency and date formatting
//! - `export-csv` - Table export
//! - `validate` - Phone and password rules
//!
//! # Sessions
//!
//! The CLI keeps no session cookies. Backend actions that require a login
//! answer with a redirect to the login page; the CLI prints the redirect
//! target and exits successfully, since a redirect is a navigation rather
//! than a failed action.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shopsphere_storefront::config::SentryConfig;

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "shopsphere")]
#[command(author, version, about = "ShopSphere storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cart actions
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Add a product to the wishlist
    Wishlist {
        /// Product ID
        product_id: String,
    },
    /// Toggle the like on a product
    Like {
        /// Product ID
        product_id: String,
    },
    /// Formatting helpers
    Format {
        #[command(subcommand)]
        target: FormatTarget,
    },
    /// Export a JSON table as CSV
    ExportCsv {
        /// JSON file holding an array of rows, each an array of cell strings
        #[arg(short, long)]
        input: PathBuf,

        /// CSV file to write
        #[arg(short, long, default_value = "export.csv")]
        output: String,
    },
    /// Check input against the storefront's field rules
    Validate {
        #[command(subcommand)]
        target: ValidateTarget,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Quick add one unit of a product
    Add {
        /// Product ID
        product_id: String,

        /// Size (`S`, `M`, `L`, ...)
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Increase or decrease the quantity of a cart line
    Update {
        /// Cart line ID
        item_id: String,

        /// `increase` or `decrease`
        action: String,

        /// Current quantity of the line
        #[arg(short, long)]
        current: String,
    },
}

#[derive(Subcommand)]
enum FormatTarget {
    /// Format an amount as Indian rupees
    Currency {
        /// Amount, e.g. `1234567.891`
        amount: String,
    },
    /// Format a `YYYY-MM-DD` or RFC 3339 date
    Date {
        /// Date string
        date: String,
    },
}

#[derive(Subcommand)]
enum ValidateTarget {
    /// Check an Indian mobile number
    Phone {
        /// Phone number
        number: String,
    },
    /// Check password strength and, optionally, its confirmation
    Password {
        /// Password
        password: String,

        /// Confirmation to compare against
        #[arg(short, long)]
        confirm: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Sentry settings only; commands that talk to the backend load the rest
    let sentry = SentryConfig::from_env();
    let _sentry_guard = shopsphere_storefront::telemetry::init(
        &sentry,
        "shopsphere_cli=info,shopsphere_storefront=info",
    );

    let cli = Cli::parse();

    // Returned rather than `process::exit` so the Sentry guard flushes on drop
    exit_code(run(cli).await)
}

fn exit_code(result: Result<(), Box<dyn std::error::Error>>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add { product_id, size } => {
                commands::actions::add_to_cart(&product_id, size.as_deref()).await?;
            }
            CartAction::Update {
                item_id,
                action,
                current,
            } => commands::actions::update_quantity(&item_id, &action, &current).await?,
        },
        Commands::Wishlist { product_id } => commands::actions::add_to_wishlist(&product_id).await?,
        Commands::Like { product_id } => commands::actions::toggle_like(&product_id).await?,
        Commands::Format { target } => match target {
            FormatTarget::Currency { amount } => commands::format::currency(&amount)?,
            FormatTarget::Date { date } => commands::format::date(&date)?,
        },
        Commands::ExportCsv { input, output } => commands::export::table(&input, &output)?,
        Commands::Validate { target } => match target {
            ValidateTarget::Phone { number } => commands::validate::phone(&number)?,
            ValidateTarget::Password { password, confirm } => {
                commands::validate::password(&password, confirm.as_deref())?;
            }
        },
    }
    Ok(())
}
