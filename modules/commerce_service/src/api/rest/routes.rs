//! Route registration and the OpenAPI document

use super::{dto::*, error::Problem, handlers};
use crate::domain::Service;
use axum::{routing::get, Extension, Json, Router};
use std::sync::Arc;
use utoipa::OpenApi;

/// OpenAPI description of the commerce REST surface
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_categories,
        handlers::get_category,
        handlers::create_category,
        handlers::update_category,
        handlers::delete_category,
        handlers::list_orders,
        handlers::get_order,
        handlers::create_order,
        handlers::update_order,
        handlers::delete_order,
    ),
    components(schemas(
        CategoryDto,
        CategoryRequest,
        UserDto,
        ProductDto,
        OrderStatusDto,
        PaymentDto,
        OrderItemDto,
        OrderDto,
        EntityRef,
        PaymentRequest,
        OrderItemRequest,
        CreateOrderRequest,
        UpdateOrderRequest,
        Problem,
    )),
    tags(
        (name = "categories", description = "Product categories"),
        (name = "orders", description = "Customer orders with items and payment")
    )
)]
pub struct ApiDoc;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/api/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/api/orders/{id}",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route("/api/openapi.json", get(openapi_json))
        // Add service as extension for handlers
        .layer(Extension(service))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
