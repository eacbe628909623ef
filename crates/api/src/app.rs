//! Application wiring: router construction and shared service state.

use std::sync::Arc;

use axum::{Extension, Router};

use stockroom_store::{InMemoryProductStore, WarehouseService};

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared warehouse service injected into every handler.
pub type SharedService = Arc<WarehouseService<InMemoryProductStore>>;

/// Build the application router over a fresh in-memory store.
pub fn build_app() -> Router {
    build_app_with(Arc::new(WarehouseService::new(InMemoryProductStore::new())))
}

/// Build the application router over an existing service (tests, seeding).
pub fn build_app_with(service: SharedService) -> Router {
    Router::new()
        .nest("/api/warehouse", routes::warehouse::router())
        .layer(Extension(service))
}
