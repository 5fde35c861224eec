use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Menu Catalog Entry
// ============================================================================

/// A vendor's catalog entry. Orders only ever read these; a line item keeps
/// its own snapshot of name and price, so entries can be changed or deleted
/// after being referenced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub vendor_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new catalog entry; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub available: bool,
    pub image_url: Option<String>,
    pub vendor_id: Uuid,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
    pub vendor_id: Option<Uuid>,
}

/// Catalog listing filters. `search` is a case-insensitive substring match
/// over name and category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuFilter {
    pub vendor: Option<Uuid>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl MenuFilter {
    pub fn matches(&self, item: &MenuItem) -> bool {
        if let Some(vendor) = self.vendor {
            if item.vendor_id != vendor {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &item.category != category {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !item.name.to_lowercase().contains(&needle)
                && !item.category.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}
