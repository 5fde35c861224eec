use std::future::{ready, Ready};
use std::marker::PhantomData;

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};

use crate::config::Config;
use crate::domain::user::Role;
use crate::http::ApiError;

use super::token::{self, Claims};

// ============================================================================
// Role Guard - Uniform Capability Check
// ============================================================================
//
// Mutation handlers declare the roles they require by taking a
// `RoleGuard<Policy>` parameter; extraction decodes the bearer token and
// enforces the policy before the handler body runs. No handler carries its
// own ad hoc role check.
//
// ============================================================================

pub trait RolePolicy {
    fn allows(role: Role) -> bool;

    /// For the 403 message.
    fn describe() -> &'static str;
}

/// Order status updates and menu writes are vendor/admin operations.
pub struct VendorOrAdmin;

impl RolePolicy for VendorOrAdmin {
    fn allows(role: Role) -> bool {
        matches!(role, Role::Vendor | Role::Admin)
    }

    fn describe() -> &'static str {
        "vendor or admin"
    }
}

pub struct RoleGuard<P: RolePolicy> {
    pub claims: Claims,
    _policy: PhantomData<P>,
}

impl<P: RolePolicy> FromRequest for RoleGuard<P> {
    type Error = ApiError;
    type Future = Ready<Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract::<P>(req))
    }
}

fn extract<P: RolePolicy>(req: &HttpRequest) -> Result<RoleGuard<P>, ApiError> {
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| ApiError::Internal("Config missing from app data".into()))?;
    let secret = config
        .jwt_secret
        .as_deref()
        .ok_or(ApiError::Misconfiguration)?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;
    let raw_token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

    let claims = token::decode(secret, raw_token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".into()))?;

    if !P::allows(claims.role) {
        return Err(ApiError::Forbidden(format!(
            "This action requires a {} account",
            P::describe()
        )));
    }

    Ok(RoleGuard {
        claims,
        _policy: PhantomData,
    })
}
