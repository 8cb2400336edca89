//! # lumina-db: Persistence Layer for Lumina Luxe
//!
//! The storefront keeps its state as five JSON collections. This crate
//! stores them in SQLite, one row per collection, with sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Lumina Luxe Data Flow                             │
//! │                                                                         │
//! │  Store::dispatch(action) ──► changed: [orders, cart]                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    lumina-db (THIS CRATE)                        │   │
//! │  │                                                                  │   │
//! │  │   ┌───────────────┐   ┌──────────────────────┐  ┌────────────┐ │   │
//! │  │   │   Database    │   │ CollectionRepository │  │ Migrations │ │   │
//! │  │   │   (pool.rs)   │◄──│  get / put / load /  │  │ (embedded) │ │   │
//! │  │   │  SqlitePool   │   │  save / delete       │  │ 001_*.sql  │ │   │
//! │  │   └───────────────┘   └──────────────────────┘  └────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  collections(key, value JSON, updated_at)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lumina_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("lumina.db")).await?;
//! db.collections().save("wishlist", &vec!["3"]).await?;
//! let ids: Option<Vec<String>> = db.collections().load("wishlist").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DbStatus, StoredCollection};
pub use repository::collection::CollectionRepository;
