use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::errors::OrderError;
use super::model::{DeliveryType, LineItem, Order, OrderStatus, RawLineItem};
use super::normalizer::ItemResolution;

// ============================================================================
// Order Aggregate Builder
// ============================================================================
//
// Assembles normalized line items into an immutable order. Every item
// invariant is enforced here, before the store is touched: an order is
// either fully valid and inserted once, or rejected with a precise reason.
//
// ============================================================================

/// The order placement request as submitted by the client. Any
/// client-supplied status is ignored; new orders are always pending.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub delivery_type: DeliveryType,
    #[serde(default)]
    pub items: Vec<RawLineItem>,
    pub total: f64,
}

/// Build a pending order from a placement request and the normalizer's
/// per-item resolutions.
pub fn build_order(
    request: &PlaceOrder,
    resolutions: Vec<ItemResolution>,
) -> Result<Order, OrderError> {
    if resolutions.is_empty() {
        return Err(OrderError::EmptyOrder);
    }

    let full_name = request.full_name.trim();
    if full_name.is_empty() {
        return Err(OrderError::MissingOrderField("fullName"));
    }
    let phone = request.phone.trim();
    if phone.is_empty() {
        return Err(OrderError::MissingOrderField("phone"));
    }

    if request.total < 0.0 {
        return Err(OrderError::NegativeTotal(request.total));
    }

    let mut items = Vec::with_capacity(resolutions.len());
    for (index, resolution) in resolutions.into_iter().enumerate() {
        match resolution {
            ItemResolution::Resolved { item, .. } => {
                items.push(validate_item(index, item)?);
            }
            ItemResolution::Unresolved { reason, .. } => {
                return Err(OrderError::UnattributedItem {
                    index,
                    reason: reason.as_str(),
                });
            }
        }
    }

    let computed: f64 = items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum();
    if (computed - request.total).abs() > 0.005 {
        // The client value stays authoritative; the discrepancy is only
        // surfaced for operators.
        tracing::warn!(
            client_total = request.total,
            computed_total = computed,
            "Submitted order total does not match item prices"
        );
    }

    let now = Utc::now();
    Ok(Order {
        id: Uuid::new_v4(),
        full_name: full_name.to_string(),
        phone: phone.to_string(),
        address: request.address.clone(),
        delivery_type: request.delivery_type,
        items,
        total: request.total,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    })
}

fn validate_item(index: usize, item: RawLineItem) -> Result<LineItem, OrderError> {
    let Some(vendor_id) = item.vendor_id else {
        return Err(OrderError::UnattributedItem {
            index,
            reason: "vendor missing after normalization",
        });
    };
    let Some(name) = item.name.filter(|n| !n.trim().is_empty()) else {
        return Err(OrderError::MissingField {
            index,
            field: "name",
        });
    };
    let Some(price) = item.price else {
        return Err(OrderError::MissingField {
            index,
            field: "price",
        });
    };
    if price < 0.0 {
        return Err(OrderError::NegativePrice { index, price });
    }
    if item.quantity == 0 {
        return Err(OrderError::InvalidQuantity {
            index,
            quantity: item.quantity,
        });
    }

    Ok(LineItem {
        name,
        price,
        quantity: item.quantity,
        image_url: item.image_url,
        vendor_id,
        menu_item_id: item.menu_item_id,
    })
}

// ============================================================================
// Unit Tests
// ============================================================================
