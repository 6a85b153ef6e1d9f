use serde::{Deserialize, Serialize};

use bistro_core::{DomainError, DomainResult, Entity, MenuItemId, Money, OrderId};
use bistro_menu::MenuItem;

/// Order status lifecycle.
///
/// Only `Pending` is produced by order placement; `Completed` exists so a
/// completion workflow can be added without widening the type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Completed" => Ok(OrderStatus::Completed),
            other => Err(DomainError::validation(format!("unknown order status: {other}"))),
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub menu_item_id: MenuItemId,
    pub quantity: i64,
    /// `price × quantity` captured at placement.
    pub total_price: Money,
    pub status: OrderStatus,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Order {
    /// Pair with the ordered item for display.
    pub fn line<'a>(&'a self, item: &'a MenuItem) -> OrderLine<'a> {
        OrderLine { order: self, item }
    }
}

/// Command: PlaceOrder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub menu_item_id: MenuItemId,
    pub quantity: i64,
}

impl PlaceOrder {
    pub const DEFAULT_QUANTITY: i64 = 1;

    /// Build the command; an omitted quantity means one item.
    pub fn new(menu_item_id: MenuItemId, quantity: Option<i64>) -> Self {
        Self {
            menu_item_id,
            quantity: quantity.unwrap_or(Self::DEFAULT_QUANTITY),
        }
    }

    /// Price the order against the referenced item.
    ///
    /// Quantity is not bounded and stock is not consulted.
    pub fn price(&self, item: &MenuItem) -> DomainResult<NewOrder> {
        if item.id != self.menu_item_id {
            return Err(DomainError::validation(format!(
                "order references item {} but was priced against {}",
                self.menu_item_id, item.id
            )));
        }

        let total_price = item.price.times(self.quantity)?;

        Ok(NewOrder {
            menu_item_id: self.menu_item_id,
            quantity: self.quantity,
            total_price,
            status: OrderStatus::Pending,
        })
    }
}

/// An order ready to be persisted (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub menu_item_id: MenuItemId,
    pub quantity: i64,
    pub total_price: Money,
    pub status: OrderStatus,
}

impl NewOrder {
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            menu_item_id: self.menu_item_id,
            quantity: self.quantity,
            total_price: self.total_price,
            status: self.status,
        }
    }
}

/// Human-readable `"Order #<id> - <item>"` view of an order.
#[derive(Debug, Clone, Copy)]
pub struct OrderLine<'a> {
    order: &'a Order,
    item: &'a MenuItem,
}

impl core::fmt::Display for OrderLine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Order #{} - {}", self.order.id, self.item.name)
    }
}
