//! Order ledger domain module.
//!
//! Orders capture the menu item's price at placement time; nothing here
//! re-derives a total later.

pub mod order;

pub use order::{NewOrder, Order, OrderLine, OrderStatus, PlaceOrder};
