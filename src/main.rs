use std::sync::Arc;

use actix_multipart::form::MultipartFormConfig;
use actix_web::{web, App, HttpServer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod config;
mod domain;
mod http;
mod metrics;
mod store;

use auth::AuthService;
use config::Config;
use metrics::Metrics;
use store::{
    CatalogLookup, ImageStore, InMemoryImageStore, InMemoryMenuStore, InMemoryOrderStore,
    InMemoryUserStore, MenuStore, OrderStore, UserStore,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering.
    // Default to INFO level, can be overridden with RUST_LOG env var.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,smartfood=debug")),
        )
        .init();

    let config = Config::from_env();
    if config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET is not set; login and protected routes will fail");
    }

    let orders = Arc::new(InMemoryOrderStore::new());
    let menu = Arc::new(InMemoryMenuStore::new());
    let users = Arc::new(InMemoryUserStore::new());
    let images = Arc::new(InMemoryImageStore::new());

    let metrics = Arc::new(Metrics::new()?);
    let auth_service = AuthService::new(
        users.clone() as Arc<dyn UserStore>,
        config.jwt_secret.clone(),
        config.bcrypt_cost,
    );

    let order_data = web::Data::from(orders as Arc<dyn OrderStore>);
    let menu_data = web::Data::from(menu.clone() as Arc<dyn MenuStore>);
    let catalog_data = web::Data::from(menu as Arc<dyn CatalogLookup>);
    let image_data = web::Data::from(images as Arc<dyn ImageStore>);
    let metrics_data = web::Data::from(metrics);
    let config_data = web::Data::new(config.clone());
    let auth_data = web::Data::new(auth_service);

    tracing::info!(host = %config.host, port = config.port, "🍽️ SmartFood API starting");

    HttpServer::new(move || {
        App::new()
            .app_data(order_data.clone())
            .app_data(menu_data.clone())
            .app_data(catalog_data.clone())
            .app_data(image_data.clone())
            .app_data(metrics_data.clone())
            .app_data(config_data.clone())
            .app_data(auth_data.clone())
            .app_data(
                // Menu uploads: 5MB per image, plus form fields.
                MultipartFormConfig::default()
                    .total_limit(10 * 1024 * 1024)
                    .memory_limit(6 * 1024 * 1024),
            )
            .configure(http::routes)
            .default_service(web::route().to(http::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
