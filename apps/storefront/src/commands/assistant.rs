//! # Shopping Assistant
//!
//! The concierge chat: free-text questions and photo search, both answered
//! against the live catalog.
//!
//! ```text
//! send("Gift ideas?")                 visual_search(jpeg bytes)
//!   │                                   │
//!   ├─ push user message                ├─ push user message + image preview
//!   ├─ typing = true                    ├─ typing = true
//!   ├─ gateway.shopping_assistant       ├─ gateway.visual_search
//!   ├─ push assistant reply             ├─ push assistant reply
//!   └─ typing = false                   └─ typing = false
//! ```
//!
//! Gateway failures arrive as fallback text, so a reply is always appended.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lumina_ai::{AiGateway, GenerativeModel};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::persistence::KeyValueStore;
use crate::store::Store;

/// Shortcut chips under the chat input.
pub const QUICK_HINTS: [&str; 3] = ["Gift ideas?", "What's trending?", "Visual Search"];

/// User-side text shown while a photo is being matched.
pub const VISUAL_SEARCH_NOTICE: &str = "Analyzing this for you...";

const UPLOAD_PREVIEW_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Data URI of an uploaded photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ChatMessage {
    fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            image: None,
        }
    }

    fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
            image: None,
        }
    }
}

/// One shopper's conversation. Not persisted.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Mutex<Vec<ChatMessage>>,
    typing: AtomicBool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    /// True while a reply is outstanding.
    pub fn is_typing(&self) -> bool {
        self.typing.load(Ordering::SeqCst)
    }

    /// Asks the assistant about the catalog.
    ///
    /// Blank input is ignored and returns `None`.
    pub async fn send<S, M>(&self, store: &Store<S>, gateway: &AiGateway<M>, query: &str) -> Option<ChatMessage>
    where
        S: KeyValueStore,
        M: GenerativeModel,
    {
        if query.trim().is_empty() {
            return None;
        }
        debug!(query = %query, "assistant send");

        self.push(ChatMessage::user(query));
        let inventory = store.with_state(|s| s.products.assistant_inventory());

        self.typing.store(true, Ordering::SeqCst);
        let reply = gateway.shopping_assistant(query, &inventory).await;
        Some(self.finish(reply))
    }

    /// Finds the catalog item a photo most resembles.
    pub async fn visual_search<S, M>(&self, store: &Store<S>, gateway: &AiGateway<M>, image: &[u8]) -> ChatMessage
    where
        S: KeyValueStore,
        M: GenerativeModel,
    {
        debug!(bytes = image.len(), "assistant visual search");

        self.push(ChatMessage {
            image: Some(format!("{UPLOAD_PREVIEW_PREFIX}{}", STANDARD.encode(image))),
            ..ChatMessage::user(VISUAL_SEARCH_NOTICE)
        });
        let inventory = store.with_state(|s| s.products.visual_search_inventory());

        self.typing.store(true, Ordering::SeqCst);
        let reply = gateway.visual_search(image, &inventory).await;
        self.finish(reply)
    }

    fn finish(&self, reply: String) -> ChatMessage {
        let message = ChatMessage::assistant(reply);
        self.push(message.clone());
        self.typing.store(false, Ordering::SeqCst);
        message
    }

    fn push(&self, message: ChatMessage) {
        self.lock().push(message);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
