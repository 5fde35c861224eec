use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::menu::{MenuFilter, MenuItem, MenuItemPatch, NewMenuItem};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::user::User;

pub mod memory;

pub use memory::{InMemoryImageStore, InMemoryMenuStore, InMemoryOrderStore, InMemoryUserStore};

// ============================================================================
// Storage Ports
// ============================================================================
//
// Handlers and services depend on these traits, never on a concrete
// store. The in-memory implementations live in `memory`.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("storage failure: {0}")]
    Persistence(String),
}

/// What the catalog answers for an attribution lookup. `vendor_id` is
/// optional at this boundary: an entry without a vendor is a real state the
/// normalizer has to distinguish from a miss.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub vendor_id: Option<Uuid>,
    pub name: String,
    pub price: f64,
    pub image_url: Option<String>,
}

/// Authoritative vendor attribution source for the item normalizer.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn lookup(&self, id: Uuid) -> Result<Option<CatalogRecord>, StoreError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Containment predicate: at least one line item belongs to this
    /// vendor. Matching orders are returned with their full item list.
    pub vendor: Option<Uuid>,
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a newly built order. Exactly one order is appended, or none.
    async fn insert(&self, order: Order) -> Result<Order, StoreError>;

    /// All matching orders, most recent first.
    async fn find_all(&self, filter: OrderFilter) -> Result<Vec<Order>, StoreError>;

    /// Orders containing at least one item for the given vendor, most
    /// recent first, each with its complete unfiltered item list.
    async fn find_by_vendor(
        &self,
        vendor_id: Uuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StoreError>;

    /// The only permitted post-creation mutation. Updates `updated_at`;
    /// legality of the value itself is the status machine's concern and is
    /// checked before this is called.
    async fn set_status(&self, order_id: Uuid, status: OrderStatus) -> Result<Order, StoreError>;
}

#[async_trait]
pub trait MenuStore: Send + Sync {
    async fn create(&self, item: NewMenuItem) -> Result<MenuItem, StoreError>;
    async fn find(&self, filter: MenuFilter) -> Result<Vec<MenuItem>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MenuItem>, StoreError>;
    async fn update(&self, id: Uuid, patch: MenuItemPatch) -> Result<Option<MenuItem>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Duplicate` when the (normalized) email is taken.
    async fn create(&self, user: User) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Opaque "bytes in, URL out" image storage collaborator. The real
/// deployment would back this with a CDN; the core only depends on the
/// returned URL.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, file_name: Option<&str>, bytes: Vec<u8>) -> Result<String, StoreError>;
}
