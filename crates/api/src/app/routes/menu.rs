use std::sync::Arc;

use axum::{extract::Extension, routing::get, Json, Router};

use crate::app::dto::MenuResponse;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/menu/", get(list_menu_items))
}

pub async fn list_menu_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<MenuResponse>, ApiError> {
    let menu = services.list_menu_items().await?;
    Ok(Json(MenuResponse { menu }))
}
