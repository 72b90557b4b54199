use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::core::AppError;
use crate::middleware::Identity;
use crate::modules::duplicatas::models::{CreateDuplicataRequest, Duplicata, UpdateDuplicataRequest};
use crate::modules::duplicatas::services::{DuplicataService, RecomputeOutcome};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DuplicataResponse {
    duplicata: Duplicata,
    recompute: RecomputeOutcome,
}

/// List the duplicatas of an order
/// GET /orders/{id}/duplicatas
pub async fn list_duplicatas(
    service: web::Data<Arc<DuplicataService>>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let duplicatas = service.list_for_order(&path.into_inner(), &identity).await?;

    Ok(HttpResponse::Ok().json(duplicatas))
}

/// Create a duplicata under an order
/// POST /orders/{id}/duplicatas
pub async fn create_duplicata(
    service: web::Data<Arc<DuplicataService>>,
    identity: Identity,
    path: web::Path<String>,
    request: web::Json<CreateDuplicataRequest>,
) -> Result<HttpResponse, AppError> {
    let (duplicata, recompute) = service
        .create_duplicata(&path.into_inner(), request.into_inner(), &identity)
        .await?;

    Ok(HttpResponse::Created().json(DuplicataResponse { duplicata, recompute }))
}

/// Recompute commission values for the whole installment set
/// POST /orders/{id}/duplicatas/recompute
pub async fn recompute_commissions(
    service: web::Data<Arc<DuplicataService>>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let outcome = service.recompute_for_order(&path.into_inner(), &identity).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Edit a duplicata (triggers a full commission recompute)
/// PUT /duplicatas/{id}
pub async fn update_duplicata(
    service: web::Data<Arc<DuplicataService>>,
    identity: Identity,
    path: web::Path<String>,
    request: web::Json<UpdateDuplicataRequest>,
) -> Result<HttpResponse, AppError> {
    let (duplicata, recompute) = service
        .update_duplicata(&path.into_inner(), request.into_inner(), &identity)
        .await?;

    Ok(HttpResponse::Ok().json(DuplicataResponse { duplicata, recompute }))
}

/// Mark a duplicata as paid
/// POST /duplicatas/{id}/settle
pub async fn settle_duplicata(
    service: web::Data<Arc<DuplicataService>>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let duplicata = service.settle_duplicata(&path.into_inner(), &identity).await?;

    Ok(HttpResponse::Ok().json(duplicata))
}

/// Delete a duplicata and recompute the remaining set
/// DELETE /duplicatas/{id}
pub async fn delete_duplicata(
    service: web::Data<Arc<DuplicataService>>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let recompute = service.delete_duplicata(&path.into_inner(), &identity).await?;

    Ok(HttpResponse::Ok().json(recompute))
}

/// Configure duplicata routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders/{id}/duplicatas")
            .route("", web::get().to(list_duplicatas))
            .route("", web::post().to(create_duplicata))
            .route("/recompute", web::post().to(recompute_commissions)),
    )
    .service(
        web::scope("/duplicatas")
            .route("/{id}", web::put().to(update_duplicata))
            .route("/{id}", web::delete().to(delete_duplicata))
            .route("/{id}/settle", web::post().to(settle_duplicata)),
    );
}
