//! # Seed Data Writer
//!
//! Writes the launch state of the store into a database file: the seven
//! catalog products, the summer banner, the sample order, an empty cart and
//! an empty wishlist.
//!
//! ## Usage
//! ```bash
//! cargo run -p lumina-db --bin seed
//! cargo run -p lumina-db --bin seed -- --db ./data/lumina.db
//! cargo run -p lumina-db --bin seed -- --force
//! ```

use clap::Parser;
use lumina_core::state::{AppState, Collection};
use lumina_db::{Database, DbConfig};

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Lumina Luxe seed data writer")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./lumina_dev.db")]
    db: String,

    /// Overwrite collections that already exist
    #[arg(short, long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    println!("🌱 Lumina Luxe Seed Data Writer");
    println!("===============================");
    println!("Database: {}", args.db);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.collections().count().await?;
    if existing > 0 && !args.force {
        println!("⚠ Database already has {} collections", existing);
        println!("  Skipping seed to keep existing data.");
        println!("  Pass --force to overwrite.");
        return Ok(());
    }

    let state = AppState::seeded();
    let repo = db.collections();

    println!();
    for collection in Collection::ALL {
        let value = state.collection_json(collection)?;
        repo.save(collection.key(), &value).await?;
        println!("  Wrote {:<9} ({})", collection.key(), describe(&value));
    }

    println!();
    println!("✓ Seeded {} collections", Collection::ALL.len());

    db.close().await;
    Ok(())
}

fn describe(value: &serde_json::Value) -> String {
    match value.as_array() {
        Some(items) if items.len() == 1 => "1 entry".to_string(),
        Some(items) => format!("{} entries", items.len()),
        None => "object".to_string(),
    }
}
