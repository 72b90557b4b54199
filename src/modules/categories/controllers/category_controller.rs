use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::Identity;
use crate::modules::categories::models::CategoryRequest;
use crate::modules::categories::services::CategoryService;

/// Create a category
/// POST /categories
pub async fn create_category(
    service: web::Data<Arc<CategoryService>>,
    _identity: Identity,
    request: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let category = service.create_category(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

/// Get a category with its subcategories
/// GET /categories/{id}
pub async fn get_category(
    service: web::Data<Arc<CategoryService>>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let category = service.get_category(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// List categories with their subcategories
/// GET /categories
pub async fn list_categories(
    service: web::Data<Arc<CategoryService>>,
    _identity: Identity,
) -> Result<HttpResponse, AppError> {
    let categories = service.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// Rename a category
/// PUT /categories/{id}
pub async fn rename_category(
    service: web::Data<Arc<CategoryService>>,
    _identity: Identity,
    path: web::Path<String>,
    request: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let category = service
        .rename_category(&path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

/// Delete a category and its subcategories
/// DELETE /categories/{id}
pub async fn delete_category(
    service: web::Data<Arc<CategoryService>>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_category(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add a subcategory under a category
/// POST /categories/{id}/subcategories
pub async fn create_subcategory(
    service: web::Data<Arc<CategoryService>>,
    _identity: Identity,
    path: web::Path<String>,
    request: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let subcategory = service
        .create_subcategory(&path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(subcategory))
}

/// Delete a subcategory
/// DELETE /subcategories/{id}
pub async fn delete_subcategory(
    service: web::Data<Arc<CategoryService>>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_subcategory(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure category routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::post().to(create_category))
            .route("", web::get().to(list_categories))
            .route("/{id}", web::get().to(get_category))
            .route("/{id}", web::put().to(rename_category))
            .route("/{id}", web::delete().to(delete_category))
            .route("/{id}/subcategories", web::post().to(create_subcategory)),
    )
    .service(
        web::scope("/subcategories").route("/{id}", web::delete().to(delete_subcategory)),
    );
}
