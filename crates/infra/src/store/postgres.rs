//! Postgres-backed restaurant store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (foreign key violation) | `23503` | `Constraint` |
//! | Database (check constraint violation) | `23514` | `Constraint` |
//! | Database (not-null violation) | `23502` | `Constraint` |
//! | Database (numeric out of range) | `22003` | `Constraint` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed, Io, Tls, ... | N/A | `Backend` |
//!
//! ## Concurrency
//!
//! No explicit locking. `adjust_stock` is a single `UPDATE ... RETURNING`
//! statement, so the increment is as atomic as the database's default
//! isolation makes a single statement.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use bistro_core::{MenuItemId, Money, OrderId, StockRecordId};
use bistro_inventory::{AdjustStock, NewStockRecord, StockRecord};
use bistro_menu::{MenuItem, NewMenuItem};
use bistro_sales::{NewOrder, Order, OrderStatus};

use super::r#trait::{RestaurantStore, StoreError};

/// DDL for the three tables, applied by [`PostgresRestaurantStore::migrate`].
pub const SCHEMA: &str = include_str!("schema.sql");

/// Postgres-backed store.
///
/// `PgPool` is internally reference counted, so cloning the store shares
/// the same pool.
#[derive(Debug, Clone)]
pub struct PostgresRestaurantStore {
    pool: PgPool,
}

impl PostgresRestaurantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the tables if they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RestaurantStore for PostgresRestaurantStore {
    #[instrument(skip(self), err)]
    async fn list_menu_items(&self) -> Result<Vec<MenuItem>, StoreError> {
        let rows = sqlx::query("SELECT id, name, price FROM menu_items ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_menu_items", e))?;

        rows.iter().map(menu_item_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn get_menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, StoreError> {
        let row = sqlx::query("SELECT id, name, price FROM menu_items WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_menu_item", e))?;

        row.as_ref().map(menu_item_from_row).transpose()
    }

    #[instrument(skip(self), fields(name = %item.name), err)]
    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, StoreError> {
        let row = sqlx::query("INSERT INTO menu_items (name, price) VALUES ($1, $2) RETURNING id")
            .bind(&item.name)
            .bind(item.price.amount())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_menu_item", e))?;

        let id: i64 = row.try_get("id").map_err(|e| map_sqlx_error("insert_menu_item", e))?;
        Ok(item.into_item(MenuItemId::new(id)))
    }

    #[instrument(skip(self), err)]
    async fn list_stock(&self) -> Result<Vec<StockRecord>, StoreError> {
        let rows = sqlx::query("SELECT id, item_id, quantity FROM stock ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_stock", e))?;

        rows.iter().map(stock_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn get_stock_record(&self, id: StockRecordId) -> Result<Option<StockRecord>, StoreError> {
        let row = sqlx::query("SELECT id, item_id, quantity FROM stock WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_stock_record", e))?;

        row.as_ref().map(stock_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn insert_stock_record(&self, record: NewStockRecord) -> Result<StockRecord, StoreError> {
        let row = sqlx::query("INSERT INTO stock (item_id, quantity) VALUES ($1, $2) RETURNING id")
            .bind(record.menu_item_id.get())
            .bind(record.quantity)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_stock_record", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| map_sqlx_error("insert_stock_record", e))?;
        Ok(record.into_record(StockRecordId::new(id)))
    }

    #[instrument(skip(self), err)]
    async fn adjust_stock(&self, cmd: AdjustStock) -> Result<StockRecord, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE stock
            SET quantity = quantity + $2
            WHERE id = $1
            RETURNING id, item_id, quantity
            "#,
        )
        .bind(cmd.stock_record_id.get())
        .bind(cmd.delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("adjust_stock", e))?;

        match row {
            Some(row) => stock_from_row(&row),
            None => Err(StoreError::NotFound {
                entity: "stock record",
                id: cmd.stock_record_id.get(),
            }),
        }
    }

    #[instrument(skip(self), fields(menu_item_id = %order.menu_item_id), err)]
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO orders (menu_item_id, quantity, total_price, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(order.menu_item_id.get())
        .bind(order.quantity)
        .bind(order.total_price.amount())
        .bind(order.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_order", e))?;

        let id: i64 = row.try_get("id").map_err(|e| map_sqlx_error("insert_order", e))?;
        Ok(order.into_order(OrderId::new(id)))
    }

    #[instrument(skip(self), err)]
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(
            "SELECT id, menu_item_id, quantity, total_price, status FROM orders WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_order", e))?;

        row.as_ref().map(order_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, menu_item_id, quantity, total_price, status FROM orders ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_orders", e))?;

        rows.iter().map(order_from_row).collect()
    }
}

// Row decoding

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| StoreError::Backend(format!("failed to decode column {name}: {e}")))
}

fn menu_item_from_row(row: &PgRow) -> Result<MenuItem, StoreError> {
    let price: Decimal = column(row, "price")?;
    Ok(MenuItem {
        id: MenuItemId::new(column(row, "id")?),
        name: column(row, "name")?,
        price: Money::new(price)?,
    })
}

fn stock_from_row(row: &PgRow) -> Result<StockRecord, StoreError> {
    Ok(StockRecord {
        id: StockRecordId::new(column(row, "id")?),
        menu_item_id: MenuItemId::new(column(row, "item_id")?),
        quantity: column(row, "quantity")?,
    })
}

fn order_from_row(row: &PgRow) -> Result<Order, StoreError> {
    let total_price: Decimal = column(row, "total_price")?;
    let status: String = column(row, "status")?;
    Ok(Order {
        id: OrderId::new(column(row, "id")?),
        menu_item_id: MenuItemId::new(column(row, "menu_item_id")?),
        quantity: column(row, "quantity")?,
        total_price: Money::new(total_price)?,
        status: status.parse::<OrderStatus>()?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23503") | Some("23514") | Some("23502") | Some("22003") => {
                    StoreError::Constraint(msg)
                }
                _ => StoreError::Backend(msg),
            }
        }
        other => StoreError::Backend(format!("{operation}: {other}")),
    }
}
