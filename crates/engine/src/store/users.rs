//! User store.
//!
//! Owns all account records, indexed by user id with a chat-id secondary
//! index maintained on every write.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use chatshop_core::{ChatId, UserId};

use crate::models::User;

#[derive(Default)]
struct Indexes {
    by_id: HashMap<UserId, User>,
    by_chat: HashMap<ChatId, UserId>,
}

/// Store for user accounts.
pub struct UserStore {
    inner: RwLock<Indexes>,
    next_id: AtomicI64,
}

impl UserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Indexes::default()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Get a user by id.
    pub async fn find(&self, id: UserId) -> Option<User> {
        self.inner.read().await.by_id.get(&id).cloned()
    }

    /// Get a user by external chat id.
    pub async fn find_by_chat(&self, chat_id: ChatId) -> Option<User> {
        let inner = self.inner.read().await;
        let id = inner.by_chat.get(&chat_id)?;
        inner.by_id.get(id).cloned()
    }

    /// Get all users, in ascending id order.
    pub async fn find_all(&self) -> Vec<User> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner.by_id.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    /// Insert or replace a user, keeping the chat-id index in sync.
    pub async fn save(&self, user: User) {
        self.next_id.fetch_max(user.id.as_i64() + 1, Ordering::Relaxed);
        let mut inner = self.inner.write().await;
        inner.by_chat.insert(user.chat_id, user.id);
        inner.by_id.insert(user.id, user);
    }

    /// Get the account for `chat_id`, creating it if none exists.
    ///
    /// The lookup and insert happen under one write lock, so two
    /// concurrent first commands from the same chat produce exactly one
    /// account. Returns the user and whether it was just created.
    pub async fn get_or_create(&self, chat_id: ChatId, name: &str) -> (User, bool) {
        let mut inner = self.inner.write().await;
        if let Some(id) = inner.by_chat.get(&chat_id)
            && let Some(existing) = inner.by_id.get(id)
        {
            return (existing.clone(), false);
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let user = User::new(id, chat_id, name.to_owned());
        inner.by_chat.insert(chat_id, id);
        inner.by_id.insert(id, user.clone());
        (user, true)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
