// ============================================================================
// Order Domain - Order Intake & Vendor Attribution
// ============================================================================
//
// This module contains ALL order-specific code:
// - Value objects (Order, LineItem, OrderStatus, DeliveryType)
// - Errors (OrderError enum)
// - Item normalizer (vendor attribution against the catalog)
// - Aggregate builder (validation + assembly of pending orders)
//
// Persistence lives in the store layer; this module never touches it.
//
// ============================================================================

pub mod builder;
pub mod errors;
pub mod model;
pub mod normalizer;

// Re-export for convenience
pub use builder::*;
pub use errors::*;
pub use model::*;
pub use normalizer::*;
