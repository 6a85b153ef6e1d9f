use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    routing::post,
    Json, Router,
};

use crate::app::dto::{self, CreateOrderRequest, OrderCreatedResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/order/", post(create_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<OrderCreatedResponse>, ApiError> {
    let Json(body) = body?;
    let order = services.create_order(body.into_command()?).await?;

    Ok(Json(OrderCreatedResponse {
        order_id: order.id,
        status: dto::ORDER_CREATED,
    }))
}
