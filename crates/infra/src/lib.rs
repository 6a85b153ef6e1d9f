//! Infrastructure layer: persistence for the menu, stock and order tables.

pub mod seed;
pub mod store;

pub use store::{InMemoryRestaurantStore, PostgresRestaurantStore, RestaurantStore, StoreError};
