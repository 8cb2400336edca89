//! # Storefront Commands
//!
//! Everything a front end can ask the storefront to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── shop.rs       ◄─── Browsing, cart, wishlist, banners
//! ├── checkout.rs   ◄─── Promo codes, order placement
//! ├── admin.rs      ◄─── Inventory, orders, customers, dashboard, AI drafts
//! └── assistant.rs  ◄─── Concierge chat and photo search
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only the store
//! fn list_products(store: &Store<S>, category: Option<&str>)
//!
//! // Store plus the shopper's checkout session
//! async fn add_to_cart(store: &Store<S>, session: &CheckoutSession, id: &str)
//!
//! // Only the AI gateway
//! async fn draft_campaign(gateway: &AiGateway<M>, topic: &str)
//! ```

pub mod admin;
pub mod assistant;
pub mod checkout;
pub mod shop;

pub use assistant::{ChatMessage, ChatRole, ChatSession};
pub use checkout::CheckoutSession;
pub use shop::CartResponse;
