//! Shared relational store boundary.
//!
//! Every handler reaches the menu catalog, the stock ledger and the order
//! ledger through one [`RestaurantStore`]; components never call each other.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryRestaurantStore;
pub use postgres::PostgresRestaurantStore;
pub use r#trait::{RestaurantStore, StoreError};
