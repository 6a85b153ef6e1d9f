use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use bistro_core::{DomainError, MenuItemId, OrderId, StockRecordId};
use bistro_inventory::{AdjustStock, NewStockRecord, StockRecord};
use bistro_menu::{MenuItem, NewMenuItem};
use bistro_sales::{NewOrder, Order};

/// Store-level failure.
///
/// `NotFound` is only produced by operations that address a row directly
/// (e.g. [`RestaurantStore::adjust_stock`]); lookups return `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Foreign key, check constraint or range violation.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Store unavailable, connection failure, undecodable row.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity, id } => StoreError::NotFound { entity, id },
            other => StoreError::Constraint(other.to_string()),
        }
    }
}

/// Relational store holding the `menu_items`, `stock` and `orders` tables.
///
/// Listing operations return rows in ascending id order. Implementations
/// assign ids (autoincrement) and enforce the same referential and
/// non-negative quantity constraints as the relational schema.
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    async fn list_menu_items(&self) -> Result<Vec<MenuItem>, StoreError>;

    async fn get_menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, StoreError>;

    /// Seeding/administration path; the HTTP API never creates menu items.
    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, StoreError>;

    async fn list_stock(&self) -> Result<Vec<StockRecord>, StoreError>;

    async fn get_stock_record(&self, id: StockRecordId) -> Result<Option<StockRecord>, StoreError>;

    async fn insert_stock_record(&self, record: NewStockRecord) -> Result<StockRecord, StoreError>;

    /// `quantity += delta` on one record, as a single store-side step.
    async fn adjust_stock(&self, cmd: AdjustStock) -> Result<StockRecord, StoreError>;

    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError>;

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;
}

#[async_trait]
impl<S> RestaurantStore for Arc<S>
where
    S: RestaurantStore + ?Sized,
{
    async fn list_menu_items(&self) -> Result<Vec<MenuItem>, StoreError> {
        (**self).list_menu_items().await
    }

    async fn get_menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, StoreError> {
        (**self).get_menu_item(id).await
    }

    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, StoreError> {
        (**self).insert_menu_item(item).await
    }

    async fn list_stock(&self) -> Result<Vec<StockRecord>, StoreError> {
        (**self).list_stock().await
    }

    async fn get_stock_record(&self, id: StockRecordId) -> Result<Option<StockRecord>, StoreError> {
        (**self).get_stock_record(id).await
    }

    async fn insert_stock_record(&self, record: NewStockRecord) -> Result<StockRecord, StoreError> {
        (**self).insert_stock_record(record).await
    }

    async fn adjust_stock(&self, cmd: AdjustStock) -> Result<StockRecord, StoreError> {
        (**self).adjust_stock(cmd).await
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        (**self).insert_order(order).await
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        (**self).get_order(id).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        (**self).list_orders().await
    }
}
