use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{RoleGuard, VendorOrAdmin};
use crate::domain::order::{
    build_order, normalize_items, OrderError, OrderStatus, PlaceOrder,
};
use crate::metrics::Metrics;
use crate::store::{CatalogLookup, OrderFilter, OrderStore, StoreError};

use super::ApiError;

// ============================================================================
// Order Endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub vendor: Option<Uuid>,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// POST /orders
pub async fn place_order(
    body: web::Json<PlaceOrder>,
    catalog: web::Data<dyn CatalogLookup>,
    orders: web::Data<dyn OrderStore>,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();

    let resolutions = normalize_items(catalog.get_ref(), request.items.clone()).await;
    for resolution in &resolutions {
        metrics.record_resolution(resolution.outcome());
    }

    let order = match build_order(&request, resolutions) {
        Ok(order) => order,
        Err(err) => {
            metrics.record_rejection(err.kind());
            tracing::debug!(reason = err.kind(), "Order placement rejected");
            return Err(err.into());
        }
    };

    let order = orders.insert(order).await?;
    metrics.orders_placed.inc();
    tracing::info!(
        order_id = %order.id,
        items = order.items.len(),
        total = order.total,
        "Order placed"
    );

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Order placed",
        "order": order,
    })))
}

/// GET /orders?vendor=&status=
pub async fn list_orders(
    query: web::Query<OrderListQuery>,
    orders: web::Data<dyn OrderStore>,
) -> Result<HttpResponse, ApiError> {
    let found = orders
        .find_all(OrderFilter {
            status: query.status,
            vendor: query.vendor,
        })
        .await?;
    Ok(HttpResponse::Ok().json(found))
}

/// GET /orders/vendor/{vendor_id}
pub async fn vendor_orders(
    path: web::Path<Uuid>,
    orders: web::Data<dyn OrderStore>,
) -> Result<HttpResponse, ApiError> {
    let found = orders.find_by_vendor(path.into_inner(), None).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// PATCH /orders/{order_id}/status
pub async fn update_status(
    _guard: RoleGuard<VendorOrAdmin>,
    path: web::Path<Uuid>,
    body: web::Json<StatusUpdate>,
    orders: web::Data<dyn OrderStore>,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, ApiError> {
    let status = OrderStatus::parse(&body.status).ok_or(OrderError::InvalidStatus)?;

    let order = orders
        .set_status(path.into_inner(), status)
        .await
        .map_err(|err| match err {
            StoreError::NotFound => ApiError::NotFound("Order not found".into()),
            other => other.into(),
        })?;

    metrics.record_status_update(status.as_str());
    tracing::info!(order_id = %order.id, status = %status, "Order status updated");
    Ok(HttpResponse::Ok().json(order))
}

// ============================================================================
// Endpoint Tests
// ============================================================================
