//! Operation-level locks.
//!
//! The stores are individually thread-safe, but the consistency contract
//! spans several of them: checkout must validate balance and stock and
//! then commit every mutation as one unit, and coupon redemption must
//! check and record as one unit. These locks provide that:
//!
//! - one lazily-created mutex per user, serializing every operation that
//!   touches that user's balance, cart, or redemption set;
//! - one catalog-wide mutex, serializing checkout's validate-and-commit
//!   sequence against any other stock-adjusting operation.
//!
//! Lock order is always user first, then catalog. Only checkout holds
//! both, so no cycle can form between concurrent operations.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use chatshop_core::UserId;

/// Per-user and catalog-wide operation locks.
pub struct OpLocks {
    users: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
    catalog: Mutex<()>,
}

impl OpLocks {
    /// Create a lock registry with no user locks yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            catalog: Mutex::new(()),
        }
    }

    /// Get the lock for one user, creating it on first use.
    ///
    /// Repeated calls for the same id return the same lock.
    pub async fn user(&self, id: UserId) -> Arc<Mutex<()>> {
        let mut users = self.users.lock().await;
        Arc::clone(users.entry(id).or_default())
    }

    /// The catalog-wide lock guarding stock validation and mutation.
    pub const fn catalog(&self) -> &Mutex<()> {
        &self.catalog
    }
}

impl Default for OpLocks {
    fn default() -> Self {
        Self::new()
    }
}
