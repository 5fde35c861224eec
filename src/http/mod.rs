use actix_web::{web, HttpResponse, Responder};

// ============================================================================
// HTTP Layer - Routes & Handlers
// ============================================================================

pub mod auth;
pub mod error;
pub mod menu;
pub mod orders;

pub use error::ApiError;

use crate::metrics;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(orders::place_order))
            .route("", web::get().to(orders::list_orders))
            .route("/vendor/{vendor_id}", web::get().to(orders::vendor_orders))
            .route("/{order_id}/status", web::patch().to(orders::update_status)),
    )
    .service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login)),
    )
    .service(
        web::scope("/menu")
            .route("", web::get().to(menu::list_items))
            .route("", web::post().to(menu::create_item))
            .route("/{id}", web::get().to(menu::get_item))
            .route("/{id}", web::put().to(menu::update_item))
            .route("/{id}", web::delete().to(menu::delete_item)),
    )
    .route("/health", web::get().to(metrics::health_handler))
    .route("/metrics", web::get().to(metrics::metrics_handler));
}

pub async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(serde_json::json!({ "message": "Route not found" }))
}

// ============================================================================
// Test Support
// ============================================================================

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::Arc;

    use actix_web::web::{self, ServiceConfig};
    use chrono::Utc;
    use uuid::Uuid;

    use crate::auth::{token, AuthService};
    use crate::config::Config;
    use crate::domain::user::{Role, User};
    use crate::metrics::Metrics;
    use crate::store::{
        CatalogLookup, ImageStore, InMemoryImageStore, InMemoryMenuStore, InMemoryOrderStore,
        InMemoryUserStore, MenuStore, OrderStore, UserStore,
    };

    pub const TEST_SECRET: &str = "test-secret";

    /// Shared in-memory state for handler tests. `configure()` yields a
    /// closure that installs everything a request needs as app data.
    pub struct TestState {
        pub orders: Arc<InMemoryOrderStore>,
        pub menu: Arc<InMemoryMenuStore>,
        pub users: Arc<InMemoryUserStore>,
        pub images: Arc<InMemoryImageStore>,
        pub config: Config,
    }

    impl TestState {
        pub fn new() -> Self {
            Self::with_secret(Some(TEST_SECRET))
        }

        pub fn with_secret(secret: Option<&str>) -> Self {
            Self {
                orders: Arc::new(InMemoryOrderStore::new()),
                menu: Arc::new(InMemoryMenuStore::new()),
                users: Arc::new(InMemoryUserStore::new()),
                images: Arc::new(InMemoryImageStore::new()),
                config: Config {
                    host: "127.0.0.1".into(),
                    port: 0,
                    jwt_secret: secret.map(String::from),
                    bcrypt_cost: 4,
                },
            }
        }

        pub fn configure(&self) -> impl Fn(&mut ServiceConfig) + Clone {
            let orders = self.orders.clone();
            let menu = self.menu.clone();
            let users = self.users.clone();
            let images = self.images.clone();
            let config = self.config.clone();

            move |cfg: &mut ServiceConfig| {
                let auth_service = AuthService::new(
                    users.clone() as Arc<dyn UserStore>,
                    config.jwt_secret.clone(),
                    config.bcrypt_cost,
                );
                cfg.app_data(web::Data::from(orders.clone() as Arc<dyn OrderStore>))
                    .app_data(web::Data::from(menu.clone() as Arc<dyn MenuStore>))
                    .app_data(web::Data::from(menu.clone() as Arc<dyn CatalogLookup>))
                    .app_data(web::Data::from(images.clone() as Arc<dyn ImageStore>))
                    .app_data(web::Data::new(config.clone()))
                    .app_data(web::Data::new(auth_service))
                    .app_data(web::Data::new(Metrics::new().unwrap()));
            }
        }

        /// A bearer token for a synthetic account with the given role; the
        /// guard only inspects the token, so no store write is needed.
        pub fn token_for(&self, role: Role) -> String {
            let user = User {
                id: Uuid::new_v4(),
                name: "Test Account".into(),
                email: format!("{}@example.com", role.as_str()),
                password_hash: String::new(),
                role,
                created_at: Utc::now(),
            };
            token::issue(TEST_SECRET, &user).unwrap()
        }
    }
}
