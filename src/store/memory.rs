use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::menu::{MenuFilter, MenuItem, MenuItemPatch, NewMenuItem};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::user::User;

use super::{
    CatalogLookup, CatalogRecord, ImageStore, MenuStore, OrderFilter, OrderStore, StoreError,
    UserStore,
};

// ============================================================================
// In-Memory Stores
// ============================================================================
//
// Append-order doubles as creation order, so "most recent first" is a
// reverse scan. All mutation goes through a single RwLock per store; there
// is no read-modify-write cycle outside of it.
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn order_matches(order: &Order, filter: &OrderFilter) -> bool {
    if let Some(status) = filter.status {
        if order.status != status {
            return false;
        }
    }
    if let Some(vendor) = filter.vendor {
        if !order.items.iter().any(|item| item.vendor_id == vendor) {
            return false;
        }
    }
    true
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|existing| existing.id == order.id) {
            return Err(StoreError::Duplicate(format!("order {}", order.id)));
        }
        orders.push(order.clone());
        tracing::debug!(order_id = %order.id, items = order.items.len(), "Order persisted");
        Ok(order)
    }

    async fn find_all(&self, filter: OrderFilter) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .rev()
            .filter(|order| order_matches(order, &filter))
            .cloned()
            .collect())
    }

    async fn find_by_vendor(
        &self,
        vendor_id: Uuid,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, StoreError> {
        self.find_all(OrderFilter {
            status,
            vendor: Some(vendor_id),
        })
        .await
    }

    async fn set_status(&self, order_id: Uuid, status: OrderStatus) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or(StoreError::NotFound)?;

        order.status = status;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}

#[derive(Default)]
pub struct InMemoryMenuStore {
    items: RwLock<Vec<MenuItem>>,
}

impl InMemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuStore for InMemoryMenuStore {
    async fn create(&self, item: NewMenuItem) -> Result<MenuItem, StoreError> {
        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4(),
            name: item.name,
            price: item.price,
            category: item.category,
            available: item.available,
            image_url: item.image_url,
            vendor_id: item.vendor_id,
            created_at: now,
            updated_at: now,
        };
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn find(&self, filter: MenuFilter) -> Result<Vec<MenuItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .rev()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MenuItem>, StoreError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn update(&self, id: Uuid, patch: MenuItemPatch) -> Result<Option<MenuItem>, StoreError> {
        let mut items = self.items.write().await;
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(price) = patch.price {
            item.price = price;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(available) = patch.available {
            item.available = available;
        }
        if let Some(image_url) = patch.image_url {
            item.image_url = Some(image_url);
        }
        if let Some(vendor_id) = patch.vendor_id {
            item.vendor_id = vendor_id;
        }
        item.updated_at = Utc::now();
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() < before)
    }
}

#[async_trait]
impl CatalogLookup for InMemoryMenuStore {
    async fn lookup(&self, id: Uuid) -> Result<Option<CatalogRecord>, StoreError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).map(|item| {
            CatalogRecord {
                vendor_id: Some(item.vendor_id),
                name: item.name.clone(),
                price: item.price,
                image_url: item.image_url.clone(),
            }
        }))
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::Duplicate(user.email));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryImageStore {
    blobs: RwLock<HashMap<Uuid, Vec<u8>>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, file_name: Option<&str>, bytes: Vec<u8>) -> Result<String, StoreError> {
        let id = Uuid::new_v4();
        tracing::debug!(
            image_id = %id,
            file_name = file_name.unwrap_or("<unnamed>"),
            size = bytes.len(),
            "Stored uploaded image"
        );
        self.blobs.write().await.insert(id, bytes);
        Ok(format!("/uploads/{id}"))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::domain::order::{DeliveryType, LineItem};
    use crate::domain::user::Role;

    use super::*;

    fn line_item(vendor_id: Uuid) -> LineItem {
        LineItem {
            name: "Pizza".into(),
            price: 10.0,
            quantity: 1,
            image_url: None,
            vendor_id,
            menu_item_id: None,
        }
    }

    fn order(items: Vec<LineItem>) -> Order {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4(),
            full_name: "Ada".into(),
            phone: "0700000000".into(),
            address: None,
            delivery_type: DeliveryType::Pickup,
            total: items.iter().map(|i| i.price * f64::from(i.quantity)).sum(),
            items,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_all_returns_most_recent_first() {
        let store = InMemoryOrderStore::new();
        let first = store.insert(order(vec![line_item(Uuid::new_v4())])).await.unwrap();
        let second = store.insert(order(vec![line_item(Uuid::new_v4())])).await.unwrap();

        let all = store.find_all(OrderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn test_status_filter() {
        let store = InMemoryOrderStore::new();
        let kept = store.insert(order(vec![line_item(Uuid::new_v4())])).await.unwrap();
        let accepted = store.insert(order(vec![line_item(Uuid::new_v4())])).await.unwrap();
        store
            .set_status(accepted.id, OrderStatus::Accepted)
            .await
            .unwrap();

        let pending = store
            .find_all(OrderFilter {
                status: Some(OrderStatus::Pending),
                vendor: None,
            })
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_vendor_query_is_containment_with_full_item_list() {
        let vendor_a = Uuid::new_v4();
        let vendor_b = Uuid::new_v4();
        let store = InMemoryOrderStore::new();

        let mixed = store
            .insert(order(vec![line_item(vendor_a), line_item(vendor_b)]))
            .await
            .unwrap();
        store.insert(order(vec![line_item(vendor_a)])).await.unwrap();

        let for_a = store.find_by_vendor(vendor_a, None).await.unwrap();
        let for_b = store.find_by_vendor(vendor_b, None).await.unwrap();

        // The mixed order appears in both vendors' views...
        assert_eq!(for_a.len(), 2);
        assert_eq!(for_b.len(), 1);
        assert_eq!(for_b[0].id, mixed.id);
        // ...each time with the complete item list, not filtered down.
        assert_eq!(for_b[0].items.len(), 2);
    }

    #[tokio::test]
    async fn test_vendor_query_with_no_matches_is_empty_not_an_error() {
        let store = InMemoryOrderStore::new();
        store.insert(order(vec![line_item(Uuid::new_v4())])).await.unwrap();

        let result = store.find_by_vendor(Uuid::new_v4(), None).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_set_status_touches_updated_at_only() {
        let store = InMemoryOrderStore::new();
        let stored = store.insert(order(vec![line_item(Uuid::new_v4())])).await.unwrap();

        let updated = store
            .set_status(stored.id, OrderStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Accepted);
        assert_eq!(updated.created_at, stored.created_at);
        assert_eq!(updated.items, stored.items);
        assert!(updated.updated_at >= stored.updated_at);
    }

    #[tokio::test]
    async fn test_same_status_update_is_an_observational_noop() {
        let store = InMemoryOrderStore::new();
        let stored = store.insert(order(vec![line_item(Uuid::new_v4())])).await.unwrap();

        let updated = store
            .set_status(stored.id, OrderStatus::Pending)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Pending);
        assert_eq!(updated.created_at, stored.created_at);
        assert_eq!(updated.total, stored.total);
    }

    #[tokio::test]
    async fn test_set_status_on_unknown_id_is_not_found() {
        let store = InMemoryOrderStore::new();
        let err = store
            .set_status(Uuid::new_v4(), OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    fn new_menu_item(name: &str, category: &str, vendor_id: Uuid) -> NewMenuItem {
        NewMenuItem {
            name: name.into(),
            price: 12.0,
            category: category.into(),
            available: true,
            image_url: None,
            vendor_id,
        }
    }

    #[tokio::test]
    async fn test_menu_store_crud_roundtrip() {
        let store = InMemoryMenuStore::new();
        let vendor = Uuid::new_v4();
        let created = store
            .create(new_menu_item("Pizza", "mains", vendor))
            .await
            .unwrap();

        let fetched = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Pizza");

        let updated = store
            .update(
                created.id,
                MenuItemPatch {
                    price: Some(14.0),
                    available: Some(false),
                    ..MenuItemPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, 14.0);
        assert!(!updated.available);
        assert_eq!(updated.name, "Pizza");

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_menu_search_filters() {
        let store = InMemoryMenuStore::new();
        let vendor = Uuid::new_v4();
        store.create(new_menu_item("Pizza", "mains", vendor)).await.unwrap();
        store.create(new_menu_item("Tiramisu", "desserts", vendor)).await.unwrap();
        store
            .create(new_menu_item("Burger", "mains", Uuid::new_v4()))
            .await
            .unwrap();

        let hits = store
            .find(MenuFilter {
                search: Some("piz".into()),
                ..MenuFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let by_vendor = store
            .find(MenuFilter {
                vendor: Some(vendor),
                ..MenuFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_vendor.len(), 2);
    }

    #[tokio::test]
    async fn test_menu_store_serves_catalog_lookups() {
        let store = InMemoryMenuStore::new();
        let vendor = Uuid::new_v4();
        let created = store
            .create(new_menu_item("Pizza", "mains", vendor))
            .await
            .unwrap();

        let record = store.lookup(created.id).await.unwrap().unwrap();
        assert_eq!(record.vendor_id, Some(vendor));
        assert_eq!(record.name, "Pizza");
        assert_eq!(record.price, 12.0);

        assert!(store.lookup(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_store_rejects_duplicate_email() {
        let store = InMemoryUserStore::new();
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "hash".into(),
            role: Role::User,
            created_at: Utc::now(),
        };

        store.create(user.clone()).await.unwrap();
        let err = store
            .create(User {
                id: Uuid::new_v4(),
                ..user
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_image_store_returns_uploads_url() {
        let store = InMemoryImageStore::new();
        let url = store
            .store(Some("pizza.png"), vec![0xFF, 0xD8])
            .await
            .unwrap();
        assert!(url.starts_with("/uploads/"));
    }
}
