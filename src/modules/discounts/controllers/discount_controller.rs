use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::Identity;
use crate::modules::discounts::models::UpdateDiscountSettingsRequest;
use crate::modules::discounts::services::DiscountService;

/// Get the current discount settings
/// GET /discount-settings
pub async fn get_settings(
    service: web::Data<Arc<DiscountService>>,
    _identity: Identity,
) -> Result<HttpResponse, AppError> {
    let settings = service.get_settings().await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// Update the discount settings (admin only)
/// PUT /discount-settings
pub async fn update_settings(
    service: web::Data<Arc<DiscountService>>,
    identity: Identity,
    request: web::Json<UpdateDiscountSettingsRequest>,
) -> Result<HttpResponse, AppError> {
    if !identity.is_admin() {
        return Err(AppError::unauthorized(
            "Only administrators may change discount settings",
        ));
    }

    let settings = service.update_settings(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// Configure discount settings routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/discount-settings")
            .route("", web::get().to(get_settings))
            .route("", web::put().to(update_settings)),
    );
}
