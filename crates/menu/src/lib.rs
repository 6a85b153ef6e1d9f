//! Menu catalog domain module.
//!
//! Menu items are created and priced outside this API (store seeding or
//! administration); the catalog itself is read-only.

pub mod item;

pub use item::{MenuItem, NewMenuItem};
