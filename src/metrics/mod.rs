use actix_web::{web, HttpResponse, Responder};
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Counters for the order intake path:
// - orders placed and rejected (by rejection reason)
// - catalog lookup outcomes during normalization
// - status transitions (by target status)
//
// Scraped via /metrics on the main HTTP server.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub orders_placed: IntCounter,
    pub orders_rejected: IntCounterVec,
    pub item_resolutions: IntCounterVec,
    pub status_updates: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_placed =
            IntCounter::new("orders_placed_total", "Total orders accepted and persisted")?;
        registry.register(Box::new(orders_placed.clone()))?;

        let orders_rejected = IntCounterVec::new(
            Opts::new("orders_rejected_total", "Total order placements rejected"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_rejected.clone()))?;

        let item_resolutions = IntCounterVec::new(
            Opts::new(
                "item_resolutions_total",
                "Line item vendor attribution outcomes",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(item_resolutions.clone()))?;

        let status_updates = IntCounterVec::new(
            Opts::new("order_status_updates_total", "Order status transitions"),
            &["status"],
        )?;
        registry.register(Box::new(status_updates.clone()))?;

        Ok(Self {
            registry,
            orders_placed,
            orders_rejected,
            item_resolutions,
            status_updates,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_rejection(&self, reason: &str) {
        self.orders_rejected.with_label_values(&[reason]).inc();
    }

    pub fn record_resolution(&self, outcome: &str) {
        self.item_resolutions.with_label_values(&[outcome]).inc();
    }

    pub fn record_status_update(&self, status: &str) {
        self.status_updates.with_label_values(&[status]).inc();
    }
}

pub async fn metrics_handler(metrics: web::Data<Metrics>) -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = metrics.registry().gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %err, "Failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

pub async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "smartfood-api"
    }))
}
