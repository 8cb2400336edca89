//! # `lumina` Command Line
//!
//! Runs storefront commands against the local store and prints the result
//! as JSON.
//!
//! ## Usage
//! ```bash
//! lumina products --category "Home Office"
//! lumina add 4
//! lumina cart --promo summer25
//! lumina checkout --name "Jamie Rivera" --email jamie@example.com \
//!     --address "12 Harbour Street" --promo summer25
//! lumina order-status ORD-5501 shipped
//! lumina campaign "Autumn evening wear" --publish
//! lumina ask "Gift ideas?"
//! lumina status
//! lumina reset cart wishlist
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load `lumina.toml` + `LUMINA_*` overrides
//! 3. Open the database, run migrations, load the collections
//! 4. Build the AI gateway (no key: every AI command returns its fallback)
//! 5. Run one command

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lumina_ai::{AiGateway, GeminiClient};
use lumina_core::catalog::ProductDraft;
use lumina_core::marketing::BannerDraft;
use lumina_core::validation::CheckoutForm;
use lumina_core::state::Collection;
use lumina_core::{Money, OrderStatus};
use lumina_db::{Database, DbConfig};
use lumina_storefront::commands::checkout::{apply_promo_code, place_order};
use lumina_storefront::commands::{admin, shop, ChatSession, CheckoutSession};
use lumina_storefront::{init_tracing, Store, StorefrontConfig};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lumina", version, about = "Lumina Luxe storefront")]
struct Cli {
    /// Config file (default: lumina.toml in the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List products, optionally in one category
    Products {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one product
    Product { id: String },
    /// The category bar
    Categories,
    /// Products marked down by more than $50
    Deals,
    /// Show the cart and its price breakdown
    Cart {
        #[arg(long)]
        promo: Option<String>,
    },
    /// Add one unit of a product to the cart
    Add { id: String },
    /// Remove a product from the cart
    Remove { id: String },
    /// Change a cart line's quantity by DELTA
    Qty {
        id: String,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Toggle a product on the wishlist, or list it
    Wishlist { id: Option<String> },
    /// Active hero banners
    Banners,
    /// Place an order for the current cart
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        promo: Option<String>,
    },
    /// All orders, newest first
    Orders,
    /// Set an order's status
    OrderStatus { id: String, status: OrderStatus },
    /// Customers aggregated from orders
    Customers,
    /// Dashboard figures
    Dashboard,
    /// Add a product to the catalog
    AddProduct {
        #[arg(long)]
        name: String,
        /// Dollar amount, e.g. 129.00
        #[arg(long)]
        price: Money,
        #[arg(long)]
        original_price: Option<Money>,
        #[arg(long, default_value = "Electronics")]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long, default_value_t = 10)]
        stock: u32,
    },
    /// Remove a product from the catalog
    DeleteProduct { id: String },
    /// Publish a banner
    AddBanner {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        subtitle: String,
        #[arg(long, default_value = "")]
        cta: String,
        #[arg(long, default_value = "")]
        gradient: String,
    },
    /// Remove a banner
    RemoveBanner { id: String },
    /// Draft a product description
    Describe {
        name: String,
        category: String,
        #[arg(long = "feature")]
        features: Vec<String>,
    },
    /// Generate a product photo (prints a data URI)
    Image { name: String },
    /// Draft a campaign banner, optionally publishing it
    Campaign {
        topic: String,
        #[arg(long)]
        publish: bool,
    },
    /// Ask the shopping assistant
    Ask { query: String },
    /// Find the product a photo resembles
    SearchImage { path: PathBuf },
    /// Database health, migrations and stored collections
    Status,
    /// Drop stored collections so the next start reseeds them (all if none given)
    Reset { collections: Vec<Collection> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = StorefrontConfig::load(cli.config).context("Failed to load configuration")?;

    let db_path = config.database_path()?;
    info!(?db_path, store = %config.store.name, "Opening storefront");
    let db_config = DbConfig::new(db_path)
        .max_connections(config.database.max_connections)
        .connect_timeout(Duration::from_secs(config.database.connect_timeout_secs));
    let db = Database::new(db_config)
        .await
        .context("Failed to open database")?;
    let store = Store::open(db.clone())
        .await
        .context("Failed to load storefront state")?;

    let model = match config.ai.gemini() {
        Some(settings) => Some(GeminiClient::new(&settings)?),
        None => {
            warn!("No AI API key configured; AI features will return fallback text");
            None
        }
    };
    let gateway = AiGateway::new(model);
    let session = CheckoutSession::new();
    let policy = config.orders.transition_policy;

    match cli.command {
        Command::Products { category } => print(&shop::list_products(&store, category.as_deref())),
        Command::Product { id } => print(&shop::get_product(&store, &id)?),
        Command::Categories => print(&shop::categories(&store)),
        Command::Deals => print(&shop::deals_of_the_day(&store)),
        Command::Cart { promo } => {
            if let Some(code) = promo {
                apply_promo_code(&session, &code)?;
            }
            print(&shop::get_cart(&store, &session))
        }
        Command::Add { id } => print(&shop::add_to_cart(&store, &session, &id).await?),
        Command::Remove { id } => print(&shop::remove_from_cart(&store, &session, &id).await?),
        Command::Qty { id, delta } => {
            print(&shop::update_cart_quantity(&store, &session, &id, delta).await?)
        }
        Command::Wishlist { id: Some(id) } => print(&shop::toggle_wishlist(&store, &id).await?),
        Command::Wishlist { id: None } => print(&shop::wishlist(&store)),
        Command::Banners => print(&shop::banners(&store)),
        Command::Checkout {
            name,
            email,
            address,
            promo,
        } => {
            if let Some(code) = promo {
                apply_promo_code(&session, &code)?;
            }
            let form = CheckoutForm {
                name,
                email,
                address,
            };
            print(&place_order(&store, &session, form).await?)
        }
        Command::Orders => print(&admin::list_orders(&store)),
        Command::OrderStatus { id, status } => {
            print(&admin::update_order_status(&store, policy, &id, status).await?)
        }
        Command::Customers => print(&admin::customers(&store)),
        Command::Dashboard => print(&admin::dashboard(&store)),
        Command::AddProduct {
            name,
            price,
            original_price,
            category,
            description,
            image,
            stock,
        } => {
            let draft = ProductDraft {
                name,
                description,
                price_cents: price.cents(),
                original_price_cents: original_price.map(|m| m.cents()),
                category,
                image,
                stock,
            };
            print(&admin::add_product(&store, draft).await?)
        }
        Command::DeleteProduct { id } => print(&admin::delete_product(&store, &id).await?),
        Command::AddBanner {
            title,
            subtitle,
            cta,
            gradient,
        } => {
            let draft = BannerDraft {
                title,
                subtitle,
                cta,
                bg_gradient: gradient,
            };
            print(&admin::add_banner(&store, draft).await?)
        }
        Command::RemoveBanner { id } => print(&admin::remove_banner(&store, &id).await?),
        Command::Describe {
            name,
            category,
            features,
        } => print(&admin::draft_description(&gateway, &name, &category, &features).await),
        Command::Image { name } => print(&admin::draft_product_image(&gateway, &name).await),
        Command::Campaign { topic, publish } => {
            let draft = admin::draft_campaign(&gateway, &topic).await;
            if publish {
                print(&admin::add_banner(&store, draft).await?)
            } else {
                print(&draft)
            }
        }
        Command::Ask { query } => print(&ChatSession::new().send(&store, &gateway, &query).await),
        Command::SearchImage { path } => {
            let image = std::fs::read(&path)
                .with_context(|| format!("Failed to read image {}", path.display()))?;
            print(&ChatSession::new().visual_search(&store, &gateway, &image).await)
        }
        Command::Status => print(&db.status().await?),
        Command::Reset { collections } => {
            let targets = if collections.is_empty() {
                Collection::ALL.to_vec()
            } else {
                collections
            };
            let repo = db.collections();
            let mut removed = Vec::new();
            for collection in targets {
                if repo.delete(collection.key()).await? {
                    removed.push(collection);
                }
            }
            info!(?removed, "Stored collections dropped");
            print(&removed)
        }
    }
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
