//! Stock ledger domain module.
//!
//! Business rules for per-item stock counts, implemented as plain domain
//! logic (no IO, no HTTP, no storage).

pub mod stock;

pub use stock::{AdjustStock, NewStockRecord, StockLine, StockRecord};
