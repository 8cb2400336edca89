//! # Lumina Luxe Storefront
//!
//! The orchestration layer: it owns the state, wires in the SQLite store and
//! the AI gateway, and exposes the storefront's commands.
//!
//! ## Module Organization
//! ```text
//! lumina_storefront/
//! ├── lib.rs          ◄─── You are here (exports, logging setup)
//! ├── main.rs         ◄─── `lumina` CLI
//! ├── config.rs       ◄─── lumina.toml + LUMINA_* environment
//! ├── error.rs        ◄─── API error type for commands
//! ├── persistence.rs  ◄─── Key-value store trait, startup load
//! ├── store.rs        ◄─── AppState behind a mutex, dispatch + persist
//! └── commands/
//!     ├── shop.rs       ◄─── Browsing, cart, wishlist, banners
//!     ├── checkout.rs   ◄─── Promo codes, order placement
//!     ├── admin.rs      ◄─── Back office and AI drafts
//!     └── assistant.rs  ◄─── Concierge chat
//! ```
//!
//! ## State Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Store<S>           persisted: products, cart, orders, wishlist, banners│
//! │  CheckoutSession    session only: active promo, order id source         │
//! │  ChatSession        session only: chat history, typing flag             │
//! │  AiGateway<M>       stateless: the injected model                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod persistence;
pub mod store;

pub use config::{ConfigError, StorefrontConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use persistence::{KeyValueStore, MemoryStore};
pub use store::Store;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=lumina=trace` - Show trace for lumina crates only
/// - Default: `info,lumina=debug,sqlx=warn`
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lumina=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
