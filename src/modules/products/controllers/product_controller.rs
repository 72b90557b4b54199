use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::AppError;
use crate::middleware::Identity;
use crate::modules::products::models::ProductRequest;
use crate::modules::products::services::ProductService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub category_id: Option<String>,
}

/// Create a product
/// POST /products
pub async fn create_product(
    service: web::Data<Arc<ProductService>>,
    _identity: Identity,
    request: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = service.create_product(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

/// Get a product by ID
/// GET /products/{id}
pub async fn get_product(
    service: web::Data<Arc<ProductService>>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product = service.get_product(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// List products, optionally filtered by category
/// GET /products?categoryId=...
pub async fn list_products(
    service: web::Data<Arc<ProductService>>,
    _identity: Identity,
    query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
    let products = service.list_products(query.category_id.as_deref()).await?;
    Ok(HttpResponse::Ok().json(products))
}

/// Replace a product
/// PUT /products/{id}
pub async fn update_product(
    service: web::Data<Arc<ProductService>>,
    _identity: Identity,
    path: web::Path<String>,
    request: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = service
        .update_product(&path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

/// Delete a product
/// DELETE /products/{id}
pub async fn delete_product(
    service: web::Data<Arc<ProductService>>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_product(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::post().to(create_product))
            .route("", web::get().to(list_products))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
