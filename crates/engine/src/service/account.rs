//! Account operations: resolving and creating users.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use chatshop_core::{ChatId, UserId};

use crate::models::User;
use crate::store::UserStore;

/// Resolves and creates shopper accounts.
pub struct AccountService {
    users: Arc<UserStore>,
}

impl AccountService {
    pub(crate) const fn new(users: Arc<UserStore>) -> Self {
        Self { users }
    }

    /// Resolve the account bound to an external chat id.
    pub async fn find_by_chat(&self, chat_id: ChatId) -> Option<User> {
        self.users.find_by_chat(chat_id).await
    }

    /// Get an account by id.
    pub async fn find(&self, id: UserId) -> Option<User> {
        self.users.find(id).await
    }

    /// Create an account for a chat id, with a zero balance and an empty
    /// cart.
    ///
    /// Idempotent: if the chat id already has an account, that account is
    /// returned unchanged.
    #[instrument(skip(self))]
    pub async fn create(&self, chat_id: ChatId, name: &str) -> User {
        let (user, created) = self.users.get_or_create(chat_id, name).await;
        if created {
            info!(user_id = %user.id, "created account");
        } else {
            debug!(user_id = %user.id, "account already exists");
        }
        user
    }
}
