use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::core::AppError;

/// Role assigned to the calling user by the upstream auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Salesperson,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "salesperson" => Some(Role::Salesperson),
            _ => None,
        }
    }
}

/// Identity of the calling user.
///
/// Authentication itself is delegated to the gateway in front of this
/// service; it forwards the authenticated user as `X-User-Id` and
/// `X-User-Role` headers. Requests without both headers are rejected.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Salespeople may only see their own orders; admins see everything.
    pub fn can_access_order_of(&self, salesperson_id: &str) -> bool {
        self.is_admin() || self.user_id == salesperson_id
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string())
        };

        let result = match (header("X-User-Id"), header("X-User-Role")) {
            (Some(user_id), Some(role)) if !user_id.is_empty() => match Role::parse(&role) {
                Some(role) => Ok(Identity { user_id, role }),
                None => Err(AppError::unauthorized(format!("Unknown role: {}", role))),
            },
            _ => Err(AppError::unauthorized(
                "Missing X-User-Id or X-User-Role header",
            )),
        };

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_identity_extraction() {
        let req = TestRequest::default()
            .insert_header(("X-User-Id", "user-1"))
            .insert_header(("X-User-Role", "salesperson"))
            .to_http_request();

        let identity = Identity::from_request(&req, &mut Payload::None)
            .await
            .unwrap();

        assert_eq!(identity.user_id, "user-1");
        assert_eq!(identity.role, Role::Salesperson);
        assert!(!identity.is_admin());
    }

    #[actix_web::test]
    async fn test_identity_missing_headers() {
        let req = TestRequest::default().to_http_request();
        let result = Identity::from_request(&req, &mut Payload::None).await;

        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn test_identity_unknown_role() {
        let req = TestRequest::default()
            .insert_header(("X-User-Id", "user-1"))
            .insert_header(("X-User-Role", "intern"))
            .to_http_request();

        let result = Identity::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_order_access_scoping() {
        let admin = Identity {
            user_id: "a".to_string(),
            role: Role::Admin,
        };
        let seller = Identity {
            user_id: "s".to_string(),
            role: Role::Salesperson,
        };

        assert!(admin.can_access_order_of("s"));
        assert!(seller.can_access_order_of("s"));
        assert!(!seller.can_access_order_of("other"));
    }
}
