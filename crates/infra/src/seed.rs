//! Demo catalog seeding for local development.
//!
//! Menu administration is external to the API; this only exists so a fresh
//! dev instance has something to list and order.

use tracing::info;

use bistro_core::Money;
use bistro_inventory::NewStockRecord;
use bistro_menu::{MenuItem, NewMenuItem};

use crate::store::{RestaurantStore, StoreError};

/// (name, price in cents, initial stock)
const DEMO_MENU: &[(&str, i64, i64)] = &[
    ("Burger", 500, 10),
    ("Fries", 250, 25),
    ("Lemonade", 175, 40),
];

/// Insert the demo menu with one stock record per item.
///
/// Skipped when the catalog already has items, so restarts do not duplicate
/// rows. Returns the items that were inserted.
pub async fn seed_demo_catalog<S>(store: &S) -> Result<Vec<MenuItem>, StoreError>
where
    S: RestaurantStore + ?Sized,
{
    if !store.list_menu_items().await?.is_empty() {
        info!("menu catalog already populated; skipping demo seed");
        return Ok(Vec::new());
    }

    let mut inserted = Vec::with_capacity(DEMO_MENU.len());
    for &(name, cents, quantity) in DEMO_MENU {
        let item = store
            .insert_menu_item(NewMenuItem::new(name, Money::from_minor(cents, 2)?)?)
            .await?;
        store
            .insert_stock_record(NewStockRecord {
                menu_item_id: item.id,
                quantity,
            })
            .await?;
        inserted.push(item);
    }

    info!(items = inserted.len(), "seeded demo menu catalog");
    Ok(inserted)
}
