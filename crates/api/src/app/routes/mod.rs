use axum::Router;

pub mod menu;
pub mod orders;
pub mod stock;
pub mod system;

/// Router for the back-office endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(menu::router())
        .merge(orders::router())
        .merge(stock::router())
}
