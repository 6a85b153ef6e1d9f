use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use bistro_core::{MenuItemId, OrderId, StockRecordId};
use bistro_inventory::{AdjustStock, NewStockRecord, StockRecord};
use bistro_menu::{MenuItem, NewMenuItem};
use bistro_sales::{NewOrder, Order};

use super::r#trait::{RestaurantStore, StoreError};

#[derive(Debug)]
struct Tables {
    menu_items: BTreeMap<MenuItemId, MenuItem>,
    stock: BTreeMap<StockRecordId, StockRecord>,
    orders: BTreeMap<OrderId, Order>,
    next_menu_item_id: i64,
    next_stock_id: i64,
    next_order_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            menu_items: BTreeMap::new(),
            stock: BTreeMap::new(),
            orders: BTreeMap::new(),
            next_menu_item_id: 1,
            next_stock_id: 1,
            next_order_id: 1,
        }
    }
}

impl Tables {
    fn ensure_menu_item(&self, table: &str, id: MenuItemId) -> Result<(), StoreError> {
        if self.menu_items.contains_key(&id) {
            return Ok(());
        }
        Err(StoreError::Constraint(format!(
            "{table}.menu_item_id references missing menu item {id}"
        )))
    }
}

fn ensure_non_negative(table: &str, quantity: i64) -> Result<(), StoreError> {
    if quantity < 0 {
        return Err(StoreError::Constraint(format!(
            "{table}.quantity must be >= 0 (got {quantity})"
        )));
    }
    Ok(())
}

/// In-memory store for tests/dev.
///
/// Writes are serialized by a single lock; ids start at 1 per table.
#[derive(Debug, Default)]
pub struct InMemoryRestaurantStore {
    inner: RwLock<Tables>,
}

impl InMemoryRestaurantStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RestaurantStore for InMemoryRestaurantStore {
    async fn list_menu_items(&self) -> Result<Vec<MenuItem>, StoreError> {
        Ok(self.read()?.menu_items.values().cloned().collect())
    }

    async fn get_menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, StoreError> {
        Ok(self.read()?.menu_items.get(&id).cloned())
    }

    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, StoreError> {
        let mut tables = self.write()?;
        let id = MenuItemId::new(tables.next_menu_item_id);
        tables.next_menu_item_id += 1;

        let item = item.into_item(id);
        tables.menu_items.insert(id, item.clone());
        Ok(item)
    }

    async fn list_stock(&self) -> Result<Vec<StockRecord>, StoreError> {
        Ok(self.read()?.stock.values().cloned().collect())
    }

    async fn get_stock_record(&self, id: StockRecordId) -> Result<Option<StockRecord>, StoreError> {
        Ok(self.read()?.stock.get(&id).cloned())
    }

    async fn insert_stock_record(&self, record: NewStockRecord) -> Result<StockRecord, StoreError> {
        let mut tables = self.write()?;
        tables.ensure_menu_item("stock", record.menu_item_id)?;
        ensure_non_negative("stock", record.quantity)?;

        let id = StockRecordId::new(tables.next_stock_id);
        tables.next_stock_id += 1;

        let record = record.into_record(id);
        tables.stock.insert(id, record.clone());
        Ok(record)
    }

    async fn adjust_stock(&self, cmd: AdjustStock) -> Result<StockRecord, StoreError> {
        let mut tables = self.write()?;
        let current = tables
            .stock
            .get(&cmd.stock_record_id)
            .ok_or(StoreError::NotFound {
                entity: "stock record",
                id: cmd.stock_record_id.get(),
            })?;

        // Validate on a copy so a rejected adjustment leaves the row untouched.
        let mut updated = current.clone();
        updated.apply(&cmd)?;
        ensure_non_negative("stock", updated.quantity)?;

        tables.stock.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut tables = self.write()?;
        tables.ensure_menu_item("orders", order.menu_item_id)?;
        ensure_non_negative("orders", order.quantity)?;

        let id = OrderId::new(tables.next_order_id);
        tables.next_order_id += 1;

        let order = order.into_order(id);
        tables.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.read()?.orders.values().cloned().collect())
    }
}
