//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (lines, carts, display carts, inputs)
//! - Business logic helpers (line merging, validation, formatting)
//! - The per-user cart store and its storage backend
//! - Catalog enrichment and order submission
//! - Application state and REST API handlers

pub mod enrichment;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod order;
pub mod state;
pub mod store;

// Re-export commonly used types for convenience
pub use enrichment::CartEnrichmentService;
pub use handlers::routes;
pub use order::{OrderDesk, OrderIdGenerator, SubmittedOrder, UuidOrderIds};
pub use state::{AppState, SharedState};
pub use store::{CartBackend, CartStore, InMemoryCartBackend};
