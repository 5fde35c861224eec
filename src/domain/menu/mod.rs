// ============================================================================
// Menu Domain - Vendor Catalog
// ============================================================================

pub mod model;

pub use model::*;
