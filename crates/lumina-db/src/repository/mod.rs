//! # Repository Module
//!
//! The storefront needs one repository: a key-value store of JSON
//! collections.
//!
//! ```text
//! Store::dispatch ──► db.collections().put_raw("orders", json)
//!                                │
//!                                ▼
//!                     collections(key, value, updated_at)
//! ```
//!
//! - [`CollectionRepository`](collection::CollectionRepository) - get, put and delete collections

pub mod collection;
