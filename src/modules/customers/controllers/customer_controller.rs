use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::AppError;
use crate::middleware::Identity;
use crate::modules::customers::models::CustomerRequest;
use crate::modules::customers::services::CustomerService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

/// Create a customer
/// POST /customers
pub async fn create_customer(
    service: web::Data<Arc<CustomerService>>,
    _identity: Identity,
    request: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let customer = service.create_customer(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(customer))
}

/// Get a customer by ID
/// GET /customers/{id}
pub async fn get_customer(
    service: web::Data<Arc<CustomerService>>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let customer = service.get_customer(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(customer))
}

/// List customers
/// GET /customers
pub async fn list_customers(
    service: web::Data<Arc<CustomerService>>,
    _identity: Identity,
) -> Result<HttpResponse, AppError> {
    let customers = service.list_customers().await?;
    Ok(HttpResponse::Ok().json(customers))
}

/// Replace a customer
/// PUT /customers/{id}
pub async fn update_customer(
    service: web::Data<Arc<CustomerService>>,
    _identity: Identity,
    path: web::Path<String>,
    request: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let customer = service
        .update_customer(&path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(customer))
}

/// Delete a customer
/// DELETE /customers/{id}
pub async fn delete_customer(
    service: web::Data<Arc<CustomerService>>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_customer(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete several customers at once, reporting per-id outcomes
/// POST /customers/bulk-delete
pub async fn bulk_delete(
    service: web::Data<Arc<CustomerService>>,
    _identity: Identity,
    request: web::Json<BulkDeleteRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = service.bulk_delete(&request.ids).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Configure customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::post().to(create_customer))
            .route("", web::get().to(list_customers))
            .route("/bulk-delete", web::post().to(bulk_delete))
            .route("/{id}", web::get().to(get_customer))
            .route("/{id}", web::put().to(update_customer))
            .route("/{id}", web::delete().to(delete_customer)),
    );
}
