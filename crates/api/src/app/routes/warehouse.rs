//! Warehouse routes.
//!
//! Business rejections come back as HTTP 200 with `success=false` and one
//! reason; only store failures use error status codes.

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use stockroom_warehouse::ProductId;

use crate::app::{SharedService, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_in_stock))
        .route("/:id", get(get_product))
        .route("/order", post(order_item))
        .route("/ship", post(ship_item))
        .route("/restock", post(restock_item))
        .route("/add", post(add_product))
}

/// GET /api/warehouse/:id — the product, or JSON `null` for an unknown id.
pub async fn get_product(
    Extension(service): Extension<SharedService>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match service.get_product(ProductId::new(id)) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /api/warehouse — products with unreserved stock remaining.
pub async fn list_in_stock(
    Extension(service): Extension<SharedService>,
) -> axum::response::Response {
    match service.in_stock_products() {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn order_item(
    Extension(service): Extension<SharedService>,
    Json(body): Json<dto::QuantityChangeBody>,
) -> axum::response::Response {
    match service.order(body.into()) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn ship_item(
    Extension(service): Extension<SharedService>,
    Json(body): Json<dto::QuantityChangeBody>,
) -> axum::response::Response {
    match service.ship(body.into()) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn restock_item(
    Extension(service): Extension<SharedService>,
    Json(body): Json<dto::QuantityChangeBody>,
) -> axum::response::Response {
    match service.restock(body.into()) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn add_product(
    Extension(service): Extension<SharedService>,
    Json(body): Json<dto::AddProductBody>,
) -> axum::response::Response {
    match service.add_product(&body.name, body.in_stock_quantity) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
