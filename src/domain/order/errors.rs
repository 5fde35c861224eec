// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order must contain at least one item.")]
    EmptyOrder,

    #[error("Item {index} has no vendor attribution ({reason})")]
    UnattributedItem { index: usize, reason: &'static str },

    #[error("Field `{0}` is required.")]
    MissingOrderField(&'static str),

    #[error("Item {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Item {index} has a negative price: {price}")]
    NegativePrice { index: usize, price: f64 },

    #[error("Item {index} has an invalid quantity: {quantity}")]
    InvalidQuantity { index: usize, quantity: u32 },

    #[error("Order total cannot be negative: {0}")]
    NegativeTotal(f64),

    #[error("Invalid status value.")]
    InvalidStatus,
}

impl OrderError {
    /// Stable label for metrics, independent of the display message.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::EmptyOrder => "empty_order",
            OrderError::UnattributedItem { .. } => "unattributed_item",
            OrderError::MissingOrderField(_) => "missing_order_field",
            OrderError::MissingField { .. } => "missing_field",
            OrderError::NegativePrice { .. } => "negative_price",
            OrderError::InvalidQuantity { .. } => "invalid_quantity",
            OrderError::NegativeTotal(_) => "negative_total",
            OrderError::InvalidStatus => "invalid_status",
        }
    }
}
