// ============================================================================
// User Domain - Accounts & Roles
// ============================================================================

pub mod model;

pub use model::*;
