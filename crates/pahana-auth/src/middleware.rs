//! Actix-web request extractors for authenticated principals

use crate::jwt::JwtService;
use crate::Claims;
use actix_web::{dev::Payload, error::ErrorUnauthorized, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use pahana_core::error::AppError;
use pahana_core::models::UserRole;
use std::sync::Arc;
use tracing::{debug, warn};

/// Extract the JWT from the request
///
/// Checks the Authorization header (Bearer token) first, then a cookie
/// named "token".
fn extract_token_from_request(req: &HttpRequest) -> Option<String> {
    if let Some(auth_header) = req.headers().get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if auth_str.starts_with("Bearer ") {
                return Some(auth_str[7..].to_string());
            }
        }
    }

    if let Some(cookie) = req.cookie("token") {
        return Some(cookie.value().to_string());
    }

    None
}

/// Authenticated principal extractor
///
/// Validates the request's JWT and exposes the claims to the handler.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Username of the authenticated principal
    pub username: String,

    /// Role as a display string
    pub role: String,

    /// Full claims from the token
    pub claims: Claims,
}

impl AuthenticatedUser {
    pub fn user_role(&self) -> UserRole {
        self.claims.role
    }

    pub fn is_admin(&self) -> bool {
        self.claims.is_admin()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let jwt_service = match req.app_data::<web::Data<Arc<JwtService>>>() {
            Some(service) => service.get_ref().clone(),
            None => {
                warn!("JwtService not found in app data");
                return ready(Err(ErrorUnauthorized(AppError::Unauthorized(
                    "Authentication service not configured".to_string(),
                ))));
            }
        };

        let token = match extract_token_from_request(req) {
            Some(t) => t,
            None => {
                debug!("No authentication token found in request");
                return ready(Err(ErrorUnauthorized(AppError::Unauthorized(
                    "No authentication token provided".to_string(),
                ))));
            }
        };

        match jwt_service.validate_token(&token) {
            Ok(claims) => {
                debug!(username = %claims.sub, role = ?claims.role, "Authenticated");

                ready(Ok(AuthenticatedUser {
                    username: claims.sub.clone(),
                    role: claims.role.to_string(),
                    claims,
                }))
            }
            Err(e) => {
                warn!(error = %e, "Token validation failed");
                ready(Err(ErrorUnauthorized(e)))
            }
        }
    }
}

/// Admin-only extractor
///
/// Rejects principals without the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl std::ops::Deref for AdminUser {
    type Target = AuthenticatedUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let auth_user = match AuthenticatedUser::from_request(req, payload).into_inner() {
            Ok(user) => user,
            Err(e) => return ready(Err(e)),
        };

        if !auth_user.is_admin() {
            warn!(
                username = %auth_user.username,
                role = %auth_user.role,
                "Admin access denied"
            );
            return ready(Err(ErrorUnauthorized(AppError::Forbidden)));
        }

        ready(Ok(AdminUser(auth_user)))
    }
}
