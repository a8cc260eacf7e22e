use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Product sale handlers
        .route(
            "/api/product_sales",
            get(handlers::a001_product_sale::list_all).post(handlers::a001_product_sale::upsert),
        )
        .route(
            "/api/product_sales/:id",
            get(handlers::a001_product_sale::get_by_id).delete(handlers::workflow::delete_sale),
        )
        // Workflow handlers
        .route(
            "/api/product_sales/:id/transition",
            post(handlers::workflow::transition),
        )
        .route(
            "/api/product_sales/bulk-status",
            post(handlers::workflow::bulk_status_update),
        )
        .route(
            "/api/product_sales/bulk-delete",
            post(handlers::workflow::bulk_delete),
        )
        // System log
        .route(
            "/api/logs",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::clear_all),
        )
}
