use actix_web::{web, HttpResponse};

use crate::auth::{AuthService, LoginRequest, RegisterRequest};

use super::ApiError;

// ============================================================================
// Auth Endpoints
// ============================================================================

/// POST /auth/register
pub async fn register(
    body: web::Json<RegisterRequest>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, ApiError> {
    auth.register(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Registration successful"
    })))
}

/// POST /auth/login
pub async fn login(
    body: web::Json<LoginRequest>,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, ApiError> {
    let response = auth.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

// ============================================================================
// Endpoint Tests
// ============================================================================
