use std::env;

// ============================================================================
// Configuration
// ============================================================================

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Absent secret does not prevent startup: public routes keep working,
    /// login and protected routes fail with a server error.
    pub jwt_secret: Option<String>,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(5000),
            jwt_secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            bcrypt_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(bcrypt::DEFAULT_COST),
        }
    }
}
