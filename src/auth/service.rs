use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::{normalize_email, Role, User, UserSummary};
use crate::store::UserStore;

use super::{password, token, AuthError};

// ============================================================================
// Authentication Service
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_secret: Option<String>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt_secret: Option<String>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            jwt_secret,
            bcrypt_cost,
        }
    }

    /// Create an account. Succeeds with a message only; there is no
    /// auto-login.
    pub async fn register(&self, request: RegisterRequest) -> Result<(), AuthError> {
        let name = request.name.trim();
        if name.is_empty() || request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let email = normalize_email(&request.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = password::hash(&request.password, self.bcrypt_cost)?;
        self.users
            .create(User {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email,
                password_hash,
                role: request.role,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(role = request.role.as_str(), "Account registered");
        Ok(())
    }

    /// Authenticate and issue a role-bearing token. Unknown email and wrong
    /// password are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let Some(secret) = self.jwt_secret.as_deref() else {
            tracing::error!("JWT_SECRET is not configured; rejecting login");
            return Err(AuthError::MissingSecret);
        };

        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let email = normalize_email(&request.email);
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify(&request.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = token::issue(secret, &user)?;
        Ok(LoginResponse {
            token,
            user: user.summary(),
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::store::InMemoryUserStore;

    use super::*;

    const TEST_COST: u32 = 4;

    fn service(secret: Option<&str>) -> AuthService {
        AuthService::new(
            Arc::new(InMemoryUserStore::new()),
            secret.map(String::from),
            TEST_COST,
        )
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ada".into(),
            email: email.into(),
            password: "hunter2".into(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = service(Some("secret"));
        auth.register(register_request("ada@example.com")).await.unwrap();

        let response = auth
            .login(LoginRequest {
                email: "ada@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.user.email, "ada@example.com");
        assert_eq!(response.user.role, Role::User);
        let claims = token::decode("secret", &response.token).unwrap();
        assert_eq!(claims.sub, response.user.id);
    }

    #[tokio::test]
    async fn test_email_is_case_folded_on_both_sides() {
        let auth = service(Some("secret"));
        auth.register(register_request("  Ada@Example.COM "))
            .await
            .unwrap();

        let response = auth
            .login(LoginRequest {
                email: "ada@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.user.email, "ada@example.com");

        // Re-registering under a different casing is still a duplicate.
        let err = auth
            .register(register_request("ADA@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_identical() {
        let auth = service(Some("secret"));
        auth.register(register_request("ada@example.com")).await.unwrap();

        let wrong_password = auth
            .login(LoginRequest {
                email: "ada@example.com".into(),
                password: "nope".into(),
            })
            .await
            .unwrap_err();
        let unknown_email = auth
            .login(LoginRequest {
                email: "ghost@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_without_secret_is_a_server_error() {
        let auth = service(None);
        auth.register(register_request("ada@example.com")).await.unwrap();

        let err = auth
            .login(LoginRequest {
                email: "ada@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingSecret));
    }

    #[tokio::test]
    async fn test_blank_fields_are_rejected() {
        let auth = service(Some("secret"));
        let err = auth
            .register(RegisterRequest {
                name: "  ".into(),
                ..register_request("ada@example.com")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
    }

    #[tokio::test]
    async fn test_login_payload_never_contains_the_password() {
        let auth = service(Some("secret"));
        auth.register(register_request("ada@example.com")).await.unwrap();

        let response = auth
            .login(LoginRequest {
                email: "ada@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();

        let value = serde_json::to_value(&response).unwrap();
        let user = value.get("user").unwrap();
        assert!(user.get("password").is_none());
        assert!(user.get("passwordHash").is_none());
    }
}
