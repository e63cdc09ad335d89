//! Order submission.
//!
//! Submitting hands out a fresh order id and empties the user's cart. The
//! order contents are not retained here; downstream processing is someone
//! else's concern and there is no rollback if it fails.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::helpers::format_line_summary;
use super::models::{CartLine, OrderId};
use super::store::CartStore;

/// Source of unique order identifiers.
pub trait OrderIdGenerator: Send + Sync {
    fn next_id(&self) -> OrderId;
}

/// Random v4 UUIDs in simple (hyphenless) form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidOrderIds;

impl OrderIdGenerator for UuidOrderIds {
    fn next_id(&self) -> OrderId {
        OrderId::new(Uuid::new_v4().simple().to_string())
    }
}

/// Result of a submission. `lines` is what the cart held at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedOrder {
    pub order_id: OrderId,
    pub lines: Vec<CartLine>,
}

/// Submits carts as orders.
#[derive(Clone)]
pub struct OrderDesk {
    store: CartStore,
    ids: Arc<dyn OrderIdGenerator>,
}

impl OrderDesk {
    pub fn new(store: CartStore) -> Self {
        Self::with_id_generator(store, Arc::new(UuidOrderIds))
    }

    pub fn with_id_generator(store: CartStore, ids: Arc<dyn OrderIdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Issues an order id and clears the cart in one store update.
    ///
    /// Empty carts are accepted and still get an id.
    pub fn submit(&self, username: &str) -> SubmittedOrder {
        let order_id = self.ids.next_id();
        let cart = self.store.take(username);

        info!(
            username,
            order_id = %order_id,
            items = %format_line_summary(&cart.positions),
            "order submitted"
        );

        SubmittedOrder {
            order_id,
            lines: cart.positions,
        }
    }
}
