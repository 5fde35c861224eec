use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::{Role, User};

use super::AuthError;

// ============================================================================
// Role-Bearing Tokens
// ============================================================================

const TOKEN_TTL_DAYS: i64 = 7;

/// What downstream authorization sees: the account id and its role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: i64,
}

pub fn issue(secret: &str, user: &User) -> Result<String, AuthError> {
    let claims = Claims {
        sub: user.id,
        role: user.role,
        exp: (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };
    Ok(jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn decode(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Vera".into(),
            email: "vera@example.com".into(),
            password_hash: String::new(),
            role: Role::Vendor,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_then_decode_roundtrip() {
        let user = vendor();
        let token = issue("secret", &user).unwrap();
        let claims = decode("secret", &token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Vendor);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue("secret", &vendor()).unwrap();
        assert!(decode("other-secret", &token).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = issue("secret", &vendor()).unwrap();
        let tampered = format!("{}x", token);
        assert!(decode("secret", &tampered).is_err());
    }
}
