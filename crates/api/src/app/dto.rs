use serde::{Deserialize, Serialize};

use bistro_core::{DomainError, MenuItemId, OrderId, StockRecordId};
use bistro_inventory::{AdjustStock, StockRecord};
use bistro_menu::MenuItem;
use bistro_sales::PlaceOrder;

pub const ORDER_CREATED: &str = "Order created";
pub const STOCK_UPDATED: &str = "Stock updated";

// -------------------------
// Request DTOs
// -------------------------
//
// Fields are optional at the serde level so an absent field surfaces as
// `missing_field` rather than a generic body rejection.

#[derive(Debug, Default, Deserialize)]
pub struct CreateOrderRequest {
    pub menu_item_id: Option<i64>,
    pub quantity: Option<i64>,
}

impl CreateOrderRequest {
    pub fn into_command(self) -> Result<PlaceOrder, DomainError> {
        let menu_item_id = self
            .menu_item_id
            .ok_or_else(|| DomainError::missing_field("menu_item_id"))?;
        Ok(PlaceOrder::new(MenuItemId::new(menu_item_id), self.quantity))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStockRequest {
    pub stock_item_id: Option<i64>,
    /// Signed delta added to the current quantity.
    pub quantity: Option<i64>,
}

impl UpdateStockRequest {
    pub fn into_command(self) -> Result<AdjustStock, DomainError> {
        let stock_item_id = self
            .stock_item_id
            .ok_or_else(|| DomainError::missing_field("stock_item_id"))?;
        let delta = self
            .quantity
            .ok_or_else(|| DomainError::missing_field("quantity"))?;
        Ok(AdjustStock {
            stock_record_id: StockRecordId::new(stock_item_id),
            delta,
        })
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Serialize)]
pub struct StockResponse {
    pub stock: Vec<StockRecord>,
}

#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: OrderId,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}
