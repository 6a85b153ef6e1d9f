use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use bistro_api::app::{build_app, services::AppServices};
use bistro_core::{MenuItemId, Money, StockRecordId};
use bistro_infra::{InMemoryRestaurantStore, RestaurantStore};
use bistro_inventory::NewStockRecord;
use bistro_menu::NewMenuItem;
use bistro_sales::OrderStatus;

struct TestServer {
    base_url: String,
    store: Arc<InMemoryRestaurantStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Serve the production router over a seeded in-memory store:
    /// Burger @ 5.00 with 10 in stock, Fries @ 2.50 with 25 in stock.
    async fn spawn() -> Self {
        let store = Arc::new(InMemoryRestaurantStore::new());
        for (name, price, quantity) in [("Burger", "5.00", 10), ("Fries", "2.50", 25)] {
            let price: Money = price.parse().unwrap();
            let item = store
                .insert_menu_item(NewMenuItem::new(name, price).unwrap())
                .await
                .unwrap();
            store
                .insert_stock_record(NewStockRecord {
                    menu_item_id: item.id,
                    quantity,
                })
                .await
                .unwrap();
        }

        let app = build_app(Arc::new(AppServices::new(store.clone())));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            store,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn get_json(client: &reqwest::Client, url: String) -> serde_json::Value {
    let res = client.get(url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn menu_lists_every_item_with_full_field_set() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = get_json(&client, srv.url("/menu/")).await;
    let menu = body["menu"].as_array().unwrap();

    assert_eq!(menu.len(), 2);
    assert_eq!(menu[0]["id"], 1);
    assert_eq!(menu[0]["name"], "Burger");
    assert_eq!(menu[0]["price"].as_f64(), Some(5.0));
    assert_eq!(menu[1]["name"], "Fries");
    assert_eq!(menu[1]["price"].as_f64(), Some(2.5));
}

#[tokio::test]
async fn order_then_stock_adjustment_scenario() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Order three burgers
    let res = client
        .post(srv.url("/order/"))
        .json(&json!({ "menu_item_id": 1, "quantity": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["status"], "Order created");
    let order_id = created["order_id"].as_i64().unwrap();

    let orders = srv.store.list_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id.get(), order_id);
    assert_eq!(orders[0].menu_item_id, MenuItemId::new(1));
    assert_eq!(orders[0].total_price, "15.00".parse::<Money>().unwrap());
    assert_eq!(orders[0].status, OrderStatus::Pending);

    // Take them out of stock
    let res = client
        .put(srv.url("/stock/"))
        .json(&json!({ "stock_item_id": 1, "quantity": -3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated, json!({ "status": "Stock updated" }));

    let body = get_json(&client, srv.url("/stock/")).await;
    assert_eq!(
        body,
        json!({
            "stock": [
                { "id": 1, "item": 1, "quantity": 7 },
                { "id": 2, "item": 2, "quantity": 25 },
            ]
        })
    );
}

#[tokio::test]
async fn order_quantity_defaults_to_one() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/order/"))
        .json(&json!({ "menu_item_id": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let orders = srv.store.list_orders().await.unwrap();
    assert_eq!(orders[0].quantity, 1);
    assert_eq!(orders[0].total_price, "2.50".parse::<Money>().unwrap());
}

#[tokio::test]
async fn ordering_unknown_item_is_not_found_and_creates_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/order/"))
        .json(&json!({ "menu_item_id": 99, "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");

    assert!(srv.store.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn adjusting_unknown_stock_record_is_not_found_and_mutates_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let before = get_json(&client, srv.url("/stock/")).await;

    let res = client
        .put(srv.url("/stock/"))
        .json(&json!({ "stock_item_id": 42, "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let after = get_json(&client, srv.url("/stock/")).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn adjusting_below_zero_is_rejected_by_the_store() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/stock/"))
        .json(&json!({ "stock_item_id": 1, "quantity": -11 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "constraint_violation");

    let record = srv
        .store
        .get_stock_record(StockRecordId::new(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.quantity, 10);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/stock/"))
        .json(&json!({ "stock_item_id": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "missing_field");

    let res = client
        .post(srv.url("/order/"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(srv.store.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn listings_are_idempotent_without_writes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let menu1 = get_json(&client, srv.url("/menu/")).await;
    let menu2 = get_json(&client, srv.url("/menu/")).await;
    assert_eq!(menu1, menu2);

    let stock1 = get_json(&client, srv.url("/stock/")).await;
    let stock2 = get_json(&client, srv.url("/stock/")).await;
    assert_eq!(stock1, stock2);
}

#[tokio::test]
async fn order_total_is_not_rederived_after_price_changes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/order/"))
        .json(&json!({ "menu_item_id": 1, "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // A later catalog change (done externally) leaves the placed order alone.
    let pricier = NewMenuItem::new("Burger Deluxe", "8.00".parse().unwrap()).unwrap();
    srv.store.insert_menu_item(pricier).await.unwrap();

    let orders = srv.store.list_orders().await.unwrap();
    assert_eq!(orders[0].total_price, "10.00".parse::<Money>().unwrap());
}

#[tokio::test]
async fn health_endpoint_is_up() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
