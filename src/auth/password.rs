use super::AuthError;

// ============================================================================
// Password Hashing
// ============================================================================

pub fn hash(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Constant result shape regardless of failure mode: a malformed stored
/// hash verifies as false rather than surfacing an error the client could
/// distinguish.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}
