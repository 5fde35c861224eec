// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// One subdirectory per aggregate: value objects, errors, and the logic
// that operates on them. This layer is completely separate from storage
// and HTTP concerns.
//
// ============================================================================

pub mod menu;
pub mod order;
pub mod user;
