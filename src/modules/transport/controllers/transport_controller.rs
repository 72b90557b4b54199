use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::Identity;
use crate::modules::transport::models::TransportCompanyRequest;
use crate::modules::transport::services::TransportService;

/// Create a transport company
/// POST /transport-companies
pub async fn create_company(
    service: web::Data<Arc<TransportService>>,
    _identity: Identity,
    request: web::Json<TransportCompanyRequest>,
) -> Result<HttpResponse, AppError> {
    let company = service.create_company(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(company))
}

/// Get a transport company by ID
/// GET /transport-companies/{id}
pub async fn get_company(
    service: web::Data<Arc<TransportService>>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let company = service.get_company(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(company))
}

/// List transport companies
/// GET /transport-companies
pub async fn list_companies(
    service: web::Data<Arc<TransportService>>,
    _identity: Identity,
) -> Result<HttpResponse, AppError> {
    let companies = service.list_companies().await?;
    Ok(HttpResponse::Ok().json(companies))
}

/// Replace a transport company
/// PUT /transport-companies/{id}
pub async fn update_company(
    service: web::Data<Arc<TransportService>>,
    _identity: Identity,
    path: web::Path<String>,
    request: web::Json<TransportCompanyRequest>,
) -> Result<HttpResponse, AppError> {
    let company = service
        .update_company(&path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(company))
}

/// Delete a transport company
/// DELETE /transport-companies/{id}
pub async fn delete_company(
    service: web::Data<Arc<TransportService>>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_company(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure transport company routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transport-companies")
            .route("", web::post().to(create_company))
            .route("", web::get().to(list_companies))
            .route("/{id}", web::get().to(get_company))
            .route("/{id}", web::put().to(update_company))
            .route("/{id}", web::delete().to(delete_company)),
    );
}
