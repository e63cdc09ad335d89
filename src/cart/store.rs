//! Cart storage.
//!
//! `CartStore` is the authoritative owner of cart contents, keyed by
//! username. The map itself lives behind the `CartBackend` port so the
//! in-memory implementation can be swapped without touching cart rules.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::helpers::{merge_line, merge_lines};
use super::models::{Cart, CartLine};

// =============================================================================
// Backend Port
// =============================================================================

/// Keyed cart storage.
///
/// Implementations must run `modify` closures under a per-username lock so
/// that a concurrent reader sees either the whole mutation or none of it.
pub trait CartBackend: Send + Sync {
    /// Returns the stored cart, if any. Never creates an entry.
    fn load(&self, username: &str) -> Option<Cart>;

    /// Applies `apply` to the cart for `username`, creating an empty one if
    /// missing, and returns a snapshot of the result.
    fn modify(&self, username: &str, apply: &mut dyn FnMut(&mut Cart)) -> Cart;
}

/// Process-local backend. DashMap shard locks guard each entry.
#[derive(Default)]
pub struct InMemoryCartBackend {
    carts: DashMap<String, Cart>,
}

impl InMemoryCartBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of usernames with a stored cart (empty carts included).
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

impl CartBackend for InMemoryCartBackend {
    fn load(&self, username: &str) -> Option<Cart> {
        self.carts.get(username).map(|cart| cart.value().clone())
    }

    fn modify(&self, username: &str, apply: &mut dyn FnMut(&mut Cart)) -> Cart {
        let mut entry = self.carts.entry(username.to_string()).or_default();
        apply(entry.value_mut());
        entry.value().clone()
    }
}

// =============================================================================
// Store
// =============================================================================

/// Cart operations over a `CartBackend`.
///
/// Inputs are assumed to be validated by the caller; see
/// `cart::helpers::validate_*`. Every mutation is a single backend `modify`.
#[derive(Clone)]
pub struct CartStore {
    backend: Arc<dyn CartBackend>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Creates a store over a fresh in-memory backend.
    pub fn new() -> Self {
        Self::with_backend(Arc::new(InMemoryCartBackend::new()))
    }

    pub fn with_backend(backend: Arc<dyn CartBackend>) -> Self {
        Self { backend }
    }

    /// Returns the cart for `username`, or an empty cart without storing it.
    pub fn get(&self, username: &str) -> Cart {
        self.backend.load(username).unwrap_or_default()
    }

    /// Adds `quantity` to the article's line, appending it if new.
    pub fn add_line(&self, username: &str, article_number: &str, quantity: u32) -> Cart {
        debug!(username, article_number, quantity, "add line");
        self.backend.modify(username, &mut |cart: &mut Cart| {
            merge_line(cart, article_number, quantity);
        })
    }

    /// Adds several lines as one update. Duplicates fold cumulatively.
    pub fn add_lines(&self, username: &str, lines: &[CartLine]) -> Cart {
        debug!(username, lines = lines.len(), "add lines");
        self.backend.modify(username, &mut |cart: &mut Cart| merge_lines(cart, lines))
    }

    /// Removes the article's line. Absent lines are not an error.
    pub fn remove_line(&self, username: &str, article_number: &str) -> Cart {
        debug!(username, article_number, "remove line");
        self.backend.modify(username, &mut |cart: &mut Cart| {
            cart.positions.retain(|l| l.article_number != article_number);
        })
    }

    /// Replaces the article's quantity, creating the line if absent.
    pub fn set_line_quantity(&self, username: &str, article_number: &str, quantity: u32) -> Cart {
        debug!(username, article_number, quantity, "set line quantity");
        self.backend.modify(username, &mut |cart: &mut Cart| {
            match cart
                .positions
                .iter_mut()
                .find(|l| l.article_number == article_number)
            {
                Some(line) => line.quantity = quantity,
                None => cart.positions.push(CartLine::new(article_number, quantity)),
            }
        })
    }

    /// Empties the cart. The username stays known to the backend.
    pub fn clear(&self, username: &str) {
        debug!(username, "clear cart");
        self.backend.modify(username, &mut |cart: &mut Cart| cart.positions.clear());
    }

    /// Sum of quantities; 0 for unknown users.
    pub fn item_count(&self, username: &str) -> u64 {
        self.get(username).item_count()
    }

    /// Empties the cart and hands back what it held, in one step.
    pub(crate) fn take(&self, username: &str) -> Cart {
        let mut taken = Cart::default();
        self.backend.modify(username, &mut |cart: &mut Cart| {
            taken = std::mem::take(cart);
        });
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(cart: &Cart) -> Vec<(&str, u32)> {
        cart.positions
            .iter()
            .map(|l| (l.article_number.as_str(), l.quantity))
            .collect()
    }

    #[test]
    fn test_add_line_accumulates() {
        let store = CartStore::new();
        store.add_line("alice", "095210", 1);
        store.add_line("alice", "095210", 2);

        let cart = store.get("alice");
        assert_eq!(lines(&cart), vec![("095210", 3)]);
    }

    #[test]
    fn test_additivity_over_many_adds() {
        let store = CartStore::new();
        let quantities = [3, 1, 4, 1, 5, 9, 2, 6];
        for q in quantities {
            store.add_line("alice", "A", q);
        }
        assert_eq!(
            store.get("alice").line("A").map(|l| l.quantity),
            Some(quantities.iter().sum())
        );
    }

    #[test]
    fn test_add_lines_folds_and_keeps_first_seen_order() {
        let store = CartStore::new();
        let cart = store.add_lines(
            "bob",
            &[
                CartLine::new("A", 1),
                CartLine::new("B", 2),
                CartLine::new("A", 3),
            ],
        );

        assert_eq!(lines(&cart), vec![("A", 4), ("B", 2)]);
        assert_eq!(store.item_count("bob"), 6);
    }

    #[test]
    fn test_quantity_update_does_not_reorder() {
        let store = CartStore::new();
        store.add_line("alice", "B", 1);
        store.add_line("alice", "A", 1);
        store.add_line("alice", "B", 5);
        store.set_line_quantity("alice", "B", 2);

        assert_eq!(lines(&store.get("alice")), vec![("B", 2), ("A", 1)]);
    }

    #[test]
    fn test_remove_line_is_idempotent() {
        let store = CartStore::new();
        store.add_lines("alice", &[CartLine::new("A", 1), CartLine::new("B", 2)]);

        let once = store.remove_line("alice", "A");
        let twice = store.remove_line("alice", "A");

        assert_eq!(once, twice);
        assert!(store.get("alice").line("A").is_none());
        assert_eq!(lines(&twice), vec![("B", 2)]);
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let store = CartStore::new();
        let cart = store.remove_line("nobody", "A");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_line_quantity_replaces() {
        let store = CartStore::new();
        store.add_line("u", "A", 2);
        let cart = store.set_line_quantity("u", "A", 5);
        assert_eq!(lines(&cart), vec![("A", 5)]);
    }

    #[test]
    fn test_set_line_quantity_creates_missing_line() {
        let store = CartStore::new();
        let cart = store.set_line_quantity("u", "Z", 7);
        assert_eq!(lines(&cart), vec![("Z", 7)]);
    }

    #[test]
    fn test_clear_keeps_key_and_empties_cart() {
        let backend = Arc::new(InMemoryCartBackend::new());
        let store = CartStore::with_backend(backend.clone());
        store.add_line("alice", "A", 2);

        store.clear("alice");

        assert!(store.get("alice").is_empty());
        assert_eq!(store.item_count("alice"), 0);
        assert_eq!(backend.load("alice"), Some(Cart::default()));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_get_does_not_persist_empty_cart() {
        let backend = Arc::new(InMemoryCartBackend::new());
        let store = CartStore::with_backend(backend.clone());

        assert!(store.get("ghost").is_empty());
        assert_eq!(store.item_count("ghost"), 0);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_carts_are_isolated_per_user() {
        let store = CartStore::new();
        store.add_line("alice", "A", 5);
        store.add_line("bob", "B", 3);

        assert_eq!(lines(&store.get("alice")), vec![("A", 5)]);
        assert_eq!(lines(&store.get("bob")), vec![("B", 3)]);
    }

    #[test]
    fn test_take_empties_and_returns_contents() {
        let store = CartStore::new();
        store.add_line("alice", "A", 2);

        let taken = store.take("alice");

        assert_eq!(lines(&taken), vec![("A", 2)]);
        assert!(store.get("alice").is_empty());
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let store = CartStore::new();
        std::thread::scope(|s| {
            for _ in 0..8 {
                let store = store.clone();
                s.spawn(move || {
                    for _ in 0..250 {
                        store.add_line("shared", "A", 1);
                    }
                });
            }
        });

        assert_eq!(store.item_count("shared"), 2000);
        assert_eq!(store.get("shared").positions.len(), 1);
    }
}
