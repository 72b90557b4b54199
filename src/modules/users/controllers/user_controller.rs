use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::Identity;
use crate::modules::users::models::UserRequest;
use crate::modules::users::services::UserService;

/// Create a user (admin only)
/// POST /users
pub async fn create_user(
    service: web::Data<Arc<UserService>>,
    identity: Identity,
    request: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&identity)?;
    let user = service.create_user(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Get a user by ID
/// GET /users/{id}
pub async fn get_user(
    service: web::Data<Arc<UserService>>,
    _identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = service.get_user(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// List users
/// GET /users
pub async fn list_users(
    service: web::Data<Arc<UserService>>,
    _identity: Identity,
) -> Result<HttpResponse, AppError> {
    let users = service.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Replace a user (admin only)
/// PUT /users/{id}
pub async fn update_user(
    service: web::Data<Arc<UserService>>,
    identity: Identity,
    path: web::Path<String>,
    request: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&identity)?;
    let user = service
        .update_user(&path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Delete a user (admin only)
/// DELETE /users/{id}
pub async fn delete_user(
    service: web::Data<Arc<UserService>>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_admin(&identity)?;
    service.delete_user(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List user types
/// GET /user-types
pub async fn list_user_types(
    service: web::Data<Arc<UserService>>,
    _identity: Identity,
) -> Result<HttpResponse, AppError> {
    let types = service.list_user_types().await?;
    Ok(HttpResponse::Ok().json(types))
}

fn require_admin(identity: &Identity) -> Result<(), AppError> {
    if !identity.is_admin() {
        return Err(AppError::unauthorized(
            "Only administrators may manage users",
        ));
    }
    Ok(())
}

/// Configure user routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::post().to(create_user))
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    )
    .service(web::scope("/user-types").route("", web::get().to(list_user_types)));
}
