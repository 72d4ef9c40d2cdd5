//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::contract::{CommerceError, OrderPatch};
use crate::domain::Service;
use axum::{
    extract::{OriginalUri, Path},
    http::{header, StatusCode},
    Extension, Json,
};
use std::sync::Arc;

type Created<T> = (StatusCode, [(header::HeaderName, String); 1], Json<T>);

/// Location of a resource created under the collection at `collection_uri`
fn location(collection_uri: &OriginalUri, id: i64) -> String {
    format!("{}/{}", collection_uri.0.path().trim_end_matches('/'), id)
}

fn problem_at(uri: &OriginalUri) -> impl FnOnce(CommerceError) -> Problem + '_ {
    move |err| map_domain_error(err).with_instance(uri.0.path())
}

// ===== Category Handlers =====

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses((status = 200, description = "Success", body = Vec<CategoryDto>))
)]
pub async fn list_categories(
    Extension(service): Extension<Arc<Service>>,
    uri: OriginalUri,
) -> Result<Json<Vec<CategoryDto>>, Problem> {
    let categories = service.list_categories().await.map_err(problem_at(&uri))?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Success", body = CategoryDto),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn get_category(
    Extension(service): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<CategoryDto>, Problem> {
    let category = service.get_category(id).await.map_err(problem_at(&uri))?;

    Ok(Json(category.into()))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Created", body = CategoryDto),
        (status = 400, description = "Invalid request or constraint violation", body = Problem)
    )
)]
pub async fn create_category(
    Extension(service): Extension<Arc<Service>>,
    uri: OriginalUri,
    Json(req): Json<CategoryRequest>,
) -> Result<Created<CategoryDto>, Problem> {
    let category = service
        .create_category(req.into())
        .await
        .map_err(problem_at(&uri))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(&uri, category.id))],
        Json(category.into()),
    ))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Success", body = CategoryDto),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn update_category(
    Extension(service): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path(id): Path<i64>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<CategoryDto>, Problem> {
    let category = service
        .update_category(id, req.into())
        .await
        .map_err(problem_at(&uri))?;

    Ok(Json(category.into()))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "No content"),
        (status = 400, description = "Invalid request or constraint violation", body = Problem),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn delete_category(
    Extension(service): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service.delete_category(id).await.map_err(problem_at(&uri))?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Order Handlers =====

/// List all orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    responses((status = 200, description = "Success", body = Vec<OrderDto>))
)]
pub async fn list_orders(
    Extension(service): Extension<Arc<Service>>,
    uri: OriginalUri,
) -> Result<Json<Vec<OrderDto>>, Problem> {
    let orders = service.list_orders().await.map_err(problem_at(&uri))?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// Get an order by id
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Success", body = OrderDto),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn get_order(
    Extension(service): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<OrderDto>, Problem> {
    let order = service.get_order(id).await.map_err(problem_at(&uri))?;

    Ok(Json(order.into()))
}

/// Place an order
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Created", body = OrderDto),
        (status = 400, description = "Invalid request or constraint violation", body = Problem),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn create_order(
    Extension(service): Extension<Arc<Service>>,
    uri: OriginalUri,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Created<OrderDto>, Problem> {
    let order = service
        .insert_order(req.into())
        .await
        .map_err(problem_at(&uri))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(&uri, order.id))],
        Json(order.into()),
    ))
}

/// Replace an order's header fields and payment
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Success", body = OrderDto),
        (status = 400, description = "Invalid request or constraint violation", body = Problem),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn update_order(
    Extension(service): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path(id): Path<i64>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<OrderDto>, Problem> {
    let patch = OrderPatch::try_from(req).map_err(problem_at(&uri))?;
    let order = service
        .update_order(id, patch)
        .await
        .map_err(problem_at(&uri))?;

    Ok(Json(order.into()))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 204, description = "No content"),
        (status = 400, description = "Invalid request or constraint violation", body = Problem),
        (status = 404, description = "Not found", body = Problem)
    )
)]
pub async fn delete_order(
    Extension(service): Extension<Arc<Service>>,
    uri: OriginalUri,
    Path(id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service.delete_order(id).await.map_err(problem_at(&uri))?;

    Ok(StatusCode::NO_CONTENT)
}
