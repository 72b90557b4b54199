use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::AppError;
use crate::middleware::Identity;
use crate::modules::orders::models::{CreateOrderRequest, UpdateOrderRequest, UpdateOrderStatusRequest};
use crate::modules::orders::services::OrderService;

/// Query parameters for listing orders
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Create a new order
/// POST /orders
pub async fn create_order(
    service: web::Data<Arc<OrderService>>,
    identity: Identity,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service.create_order(request.into_inner(), &identity).await?;

    Ok(HttpResponse::Created().json(order))
}

/// Get order by ID
/// GET /orders/{id}
pub async fn get_order(
    service: web::Data<Arc<OrderService>>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = service.get_order(&path.into_inner(), &identity).await?;

    Ok(HttpResponse::Ok().json(order))
}

/// List orders (salespeople see only their own)
/// GET /orders
pub async fn list_orders(
    service: web::Data<Arc<OrderService>>,
    identity: Identity,
    query: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
    let orders = service
        .list_orders(&identity, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(orders))
}

/// Replace an order's items and flags (server reprices)
/// PUT /orders/{id}
pub async fn update_order(
    service: web::Data<Arc<OrderService>>,
    identity: Identity,
    path: web::Path<String>,
    request: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .update_order(&path.into_inner(), request.into_inner(), &identity)
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Transition the order status
/// PATCH /orders/{id}/status
pub async fn update_status(
    service: web::Data<Arc<OrderService>>,
    identity: Identity,
    path: web::Path<String>,
    request: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .update_status(&path.into_inner(), request.status, &identity)
        .await?;

    Ok(HttpResponse::Ok().json(order))
}

/// Configure order routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(create_order))
            .route("", web::get().to(list_orders))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}", web::put().to(update_order))
            .route("/{id}/status", web::patch().to(update_status)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListOrdersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 50);
        assert_eq!(query.offset, 0);
    }
}
