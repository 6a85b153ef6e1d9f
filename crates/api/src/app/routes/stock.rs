use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    routing::get,
    Json, Router,
};

use crate::app::dto::{self, StatusResponse, StockResponse, UpdateStockRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/stock/", get(list_stock).put(update_stock))
}

pub async fn list_stock(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<StockResponse>, ApiError> {
    let stock = services.list_stock().await?;
    Ok(Json(StockResponse { stock }))
}

/// Adds `quantity` (a signed delta) to the record named by `stock_item_id`.
pub async fn update_stock(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<UpdateStockRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(body) = body?;
    services.adjust_stock(body.into_command()?).await?;

    Ok(Json(StatusResponse {
        status: dto::STOCK_UPDATED,
    }))
}
