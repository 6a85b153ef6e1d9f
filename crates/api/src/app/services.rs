use std::sync::Arc;

use tracing::info;

use bistro_core::DomainError;
use bistro_infra::{
    seed::seed_demo_catalog, InMemoryRestaurantStore, PostgresRestaurantStore, RestaurantStore,
    StoreError,
};
use bistro_inventory::{AdjustStock, StockRecord};
use bistro_menu::MenuItem;
use bistro_sales::{Order, PlaceOrder};

use crate::app::errors::ApiError;
use crate::config::{ApiConfig, StoreBackend};

/// Request-facing operations over the shared store.
///
/// Handlers receive this through an `Extension`; the store is injected, so
/// tests can swap in [`InMemoryRestaurantStore`].
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn RestaurantStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRestaurantStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn RestaurantStore> {
        &self.store
    }

    pub async fn list_menu_items(&self) -> Result<Vec<MenuItem>, ApiError> {
        Ok(self.store.list_menu_items().await?)
    }

    pub async fn list_stock(&self) -> Result<Vec<StockRecord>, ApiError> {
        Ok(self.store.list_stock().await?)
    }

    pub async fn adjust_stock(&self, cmd: AdjustStock) -> Result<StockRecord, ApiError> {
        let record = self.store.adjust_stock(cmd).await?;
        info!(
            stock_record_id = %record.id,
            delta = cmd.delta,
            quantity = record.quantity,
            "stock adjusted"
        );
        Ok(record)
    }

    pub async fn create_order(&self, cmd: PlaceOrder) -> Result<Order, ApiError> {
        let item = self
            .store
            .get_menu_item(cmd.menu_item_id)
            .await?
            .ok_or_else(|| DomainError::not_found("menu item", cmd.menu_item_id))?;

        let new_order = cmd.price(&item)?;
        let order = self.store.insert_order(new_order).await?;

        info!(
            order_id = %order.id,
            menu_item_id = %order.menu_item_id,
            quantity = order.quantity,
            total_price = %order.total_price,
            "order created"
        );
        Ok(order)
    }
}

/// Wire the store selected by `config`, applying schema and demo seed as configured.
pub async fn build_services(config: &ApiConfig) -> Result<AppServices, StoreError> {
    let store: Arc<dyn RestaurantStore> = match &config.store {
        StoreBackend::InMemory => {
            info!("using in-memory store");
            Arc::new(InMemoryRestaurantStore::new())
        }
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            info!(max_connections, "using postgres store");
            let pg = PostgresRestaurantStore::connect(database_url, *max_connections).await?;
            pg.migrate().await?;
            Arc::new(pg)
        }
    };

    if config.seed_demo_data {
        seed_demo_catalog(store.as_ref()).await?;
    }

    Ok(AppServices::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    use bistro_core::{MenuItemId, Money, StockRecordId};
    use bistro_inventory::NewStockRecord;
    use bistro_menu::NewMenuItem;
    use bistro_sales::OrderStatus;

    async fn burger_with_stock() -> AppServices {
        let services = AppServices::in_memory();
        let item = services
            .store()
            .insert_menu_item(NewMenuItem::new("Burger", "5.00".parse().unwrap()).unwrap())
            .await
            .unwrap();
        services
            .store()
            .insert_stock_record(NewStockRecord {
                menu_item_id: item.id,
                quantity: 10,
            })
            .await
            .unwrap();
        services
    }

    #[tokio::test]
    async fn create_order_prices_and_persists_pending_order() {
        let services = burger_with_stock().await;

        let order = services
            .create_order(PlaceOrder::new(MenuItemId::new(1), Some(3)))
            .await
            .unwrap();

        assert_eq!(order.total_price, "15.00".parse::<Money>().unwrap());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(services.store().get_order(order.id).await.unwrap(), Some(order));
    }

    #[tokio::test]
    async fn create_order_for_unknown_item_is_not_found_and_writes_nothing() {
        let services = burger_with_stock().await;

        let err = services
            .create_order(PlaceOrder::new(MenuItemId::new(404), None))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::NotFound {
                entity: "menu item",
                id: 404
            }
        );
        assert!(services.store().list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orders_are_not_gated_by_stock() {
        let services = burger_with_stock().await;
        let order = services
            .create_order(PlaceOrder::new(MenuItemId::new(1), Some(500)))
            .await
            .unwrap();
        assert_eq!(order.quantity, 500);
        assert_eq!(services.list_stock().await.unwrap()[0].quantity, 10);
    }

    #[tokio::test]
    async fn adjust_stock_touches_only_the_target_record() {
        let services = burger_with_stock().await;
        services
            .store()
            .insert_stock_record(NewStockRecord {
                menu_item_id: MenuItemId::new(1),
                quantity: 4,
            })
            .await
            .unwrap();

        let updated = services
            .adjust_stock(AdjustStock {
                stock_record_id: StockRecordId::new(1),
                delta: -3,
            })
            .await
            .unwrap();
        assert_eq!(updated.quantity, 7);

        let stock = services.list_stock().await.unwrap();
        assert_eq!(stock[0].quantity, 7);
        assert_eq!(stock[1].quantity, 4);
    }

    #[tokio::test]
    async fn build_services_seeds_when_asked() {
        let config = ApiConfig::from_lookup(|k| (k == "SEED_DEMO_DATA").then(|| "true".to_string()))
            .unwrap();
        let services = build_services(&config).await.unwrap();
        assert!(!services.list_menu_items().await.unwrap().is_empty());
        assert!(!services.list_stock().await.unwrap().is_empty());
    }
}
