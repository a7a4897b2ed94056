//! Marigold CLI - Browse the store and manage the account inbox.
//!
//! # Usage
//!
//! ```bash
//! # Show a product with a delivery estimate
//! marigold product show p-42 --pincode 110001
//!
//! # List and write reviews
//! marigold reviews list p-42
//! marigold reviews add p-42 --rating 5 --comment "Lovely fabric"
//! marigold reviews delete p-42 r-7 --yes
//!
//! # Account inbox (requires MARIGOLD_AUTH_TOKEN)
//! marigold inbox messages
//! marigold inbox notifications
//! marigold inbox mark-read n-3
//!
//! # Raw content entries
//! marigold content news
//! ```
//!
//! # Commands
//!
//! - `product` - Product detail and delivery estimates
//! - `reviews` - List, submit, and delete reviews
//! - `inbox` - Admin messages and notifications
//! - `content` - Raw content entries

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use marigold_storefront::api::ApiClient;
use marigold_storefront::config::StorefrontConfig;
use marigold_storefront::session::Session;

mod commands;

#[derive(Parser)]
#[command(name = "marigold")]
#[command(author, version, about = "Marigold storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Product detail and delivery estimates
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// List, submit, and delete reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Admin messages and notifications
    Inbox {
        #[command(subcommand)]
        action: InboxAction,
    },
    /// Fetch a raw content entry (collections, news)
    Content {
        /// Entry identifier
        id: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Show a product's details
    Show {
        /// Product identifier
        id: String,

        /// Pincode for a delivery estimate
        #[arg(short, long)]
        pincode: Option<String>,
    },
    /// Compute a delivery estimate for a pincode
    Estimate {
        /// Six-character pincode
        pincode: String,
    },
}

#[derive(Subcommand)]
enum ReviewAction {
    /// List all reviews for a product
    List {
        /// Product identifier
        product_id: String,
    },
    /// Submit a review
    Add {
        /// Product identifier
        product_id: String,

        /// Star rating (1-5)
        #[arg(short, long)]
        rating: u8,

        /// Review text
        #[arg(short, long)]
        comment: String,
    },
    /// Delete one of your reviews
    Delete {
        /// Product identifier
        product_id: String,

        /// Review identifier
        review_id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum InboxAction {
    /// List admin messages
    Messages,
    /// List notifications
    Notifications,
    /// Mark a notification as read
    MarkRead {
        /// Notification identifier
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let session = config
        .auth_token
        .clone()
        .map_or_else(Session::anonymous, Session::with_token);
    let api = ApiClient::new(&config, session.clone())?;

    match cli.command {
        Commands::Product { action } => match action {
            ProductAction::Show { id, pincode } => {
                commands::product::show(&api, &id, pincode.as_deref()).await?;
            }
            ProductAction::Estimate { pincode } => {
                commands::product::estimate(&pincode);
            }
        },
        Commands::Reviews { action } => match action {
            ReviewAction::List { product_id } => {
                commands::reviews::list(&api, &session, &product_id).await?;
            }
            ReviewAction::Add {
                product_id,
                rating,
                comment,
            } => {
                commands::reviews::add(&api, &product_id, rating, &comment).await?;
            }
            ReviewAction::Delete {
                product_id,
                review_id,
                yes,
            } => {
                commands::reviews::delete(&api, &product_id, &review_id, yes).await?;
            }
        },
        Commands::Inbox { action } => match action {
            InboxAction::Messages => commands::inbox::messages(&api).await?,
            InboxAction::Notifications => commands::inbox::notifications(&api, &session).await?,
            InboxAction::MarkRead { id } => {
                commands::inbox::mark_read(&api, &session, &id).await?;
            }
        },
        Commands::Content { id } => commands::content::show(&api, &id).await?,
    }
    Ok(())
}
