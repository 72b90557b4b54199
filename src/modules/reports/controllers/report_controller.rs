use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::Identity;
use crate::modules::reports::services::ReportService;

/// Dashboard aggregation: orders by status plus pending receivables
/// GET /reports/dashboard
pub async fn dashboard(
    service: web::Data<Arc<ReportService>>,
    _identity: Identity,
) -> Result<HttpResponse, AppError> {
    let dashboard = service.dashboard().await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reports").route("/dashboard", web::get().to(dashboard)));
}
