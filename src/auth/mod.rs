// ============================================================================
// Authentication & Authorization
// ============================================================================
//
// The core treats authentication as "credentials in, role-bearing token
// out". Password hashing (bcrypt) and token issuance (JWT) stay behind
// this module; nothing else in the crate sees a hash or a secret.
//
// ============================================================================

pub mod extractor;
pub mod password;
pub mod service;
pub mod token;

pub use extractor::{RoleGuard, RolePolicy, VendorOrAdmin};
pub use service::{AuthService, LoginRequest, LoginResponse, RegisterRequest};
pub use token::Claims;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Name, email and password are required")]
    MissingFields,

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Email already in use")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The JWT secret is unconfigured; logins cannot succeed.
    #[error("Server misconfiguration")]
    MissingSecret,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            // A concurrent registration can lose the race at the store.
            StoreError::Duplicate(_) => AuthError::EmailTaken,
            other => AuthError::Store(other),
        }
    }
}
