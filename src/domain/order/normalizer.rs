use futures_util::future::join_all;

use crate::store::CatalogLookup;

use super::model::RawLineItem;

// ============================================================================
// Item Normalizer - Vendor Attribution
// ============================================================================
//
// Line items arrive from an untrusted client that may omit vendor
// attribution. Each item is reconciled against the catalog independently:
// lookups carry no ordering dependency and are issued concurrently, and a
// lookup failure on one item never aborts the others. The outcome per item
// is an explicit resolution rather than a silent fallback, so the builder
// can decide what an unattributed item means for the whole order.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// The client supplied `vendor_id` itself; no lookup was performed.
    Trusted,
    /// Attribution was filled in from the catalog.
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// Neither `menuItemId` nor `_id` was present to look up.
    NoLookupKey,
    /// The lookup key matched no catalog entry.
    NotFound,
    /// The catalog entry exists but carries no vendor.
    EntryWithoutVendor,
    /// The catalog was unreachable for this item.
    LookupFailed,
}

impl UnresolvedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnresolvedReason::NoLookupKey => "no lookup key",
            UnresolvedReason::NotFound => "catalog entry not found",
            UnresolvedReason::EntryWithoutVendor => "catalog entry has no vendor",
            UnresolvedReason::LookupFailed => "catalog lookup failed",
        }
    }
}

/// Per-item normalization outcome. `Unresolved` always carries the item
/// exactly as submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemResolution {
    Resolved {
        item: RawLineItem,
        source: ResolutionSource,
    },
    Unresolved {
        item: RawLineItem,
        reason: UnresolvedReason,
    },
}

impl ItemResolution {
    pub fn item(&self) -> &RawLineItem {
        match self {
            ItemResolution::Resolved { item, .. } => item,
            ItemResolution::Unresolved { item, .. } => item,
        }
    }

    /// Metrics label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            ItemResolution::Resolved {
                source: ResolutionSource::Trusted,
                ..
            } => "trusted",
            ItemResolution::Resolved {
                source: ResolutionSource::Catalog,
                ..
            } => "catalog",
            ItemResolution::Unresolved { reason, .. } => match reason {
                UnresolvedReason::NoLookupKey => "no_lookup_key",
                UnresolvedReason::NotFound => "not_found",
                UnresolvedReason::EntryWithoutVendor => "entry_without_vendor",
                UnresolvedReason::LookupFailed => "lookup_failed",
            },
        }
    }
}

/// Normalize a submitted cart. Lookups for the individual items run
/// concurrently; results come back in submission order.
pub async fn normalize_items(
    catalog: &dyn CatalogLookup,
    items: Vec<RawLineItem>,
) -> Vec<ItemResolution> {
    join_all(items.into_iter().map(|item| normalize_item(catalog, item))).await
}

async fn normalize_item(catalog: &dyn CatalogLookup, item: RawLineItem) -> ItemResolution {
    // Client attribution is trusted as-is.
    if item.vendor_id.is_some() {
        return ItemResolution::Resolved {
            item,
            source: ResolutionSource::Trusted,
        };
    }

    // Prefer the explicit catalog reference; fall back to the item's own id
    // (clients sometimes reuse the catalog id as the cart line id).
    let Some(key) = item.menu_item_id.or(item.id) else {
        return ItemResolution::Unresolved {
            item,
            reason: UnresolvedReason::NoLookupKey,
        };
    };

    match catalog.lookup(key).await {
        Ok(Some(entry)) => {
            let Some(vendor_id) = entry.vendor_id else {
                return ItemResolution::Unresolved {
                    item,
                    reason: UnresolvedReason::EntryWithoutVendor,
                };
            };

            let RawLineItem {
                id,
                name,
                price,
                quantity,
                image_url,
                ..
            } = item;

            // Client-supplied fields win; the catalog only fills gaps.
            // Price uses "fill if absent", never "fill if falsy" - a
            // client price of 0 is legal and must be kept.
            let merged = RawLineItem {
                id,
                name: name.or(Some(entry.name)),
                price: price.or(Some(entry.price)),
                quantity,
                image_url: image_url.or(entry.image_url),
                vendor_id: Some(vendor_id),
                menu_item_id: Some(key),
            };

            ItemResolution::Resolved {
                item: merged,
                source: ResolutionSource::Catalog,
            }
        }
        Ok(None) => ItemResolution::Unresolved {
            item,
            reason: UnresolvedReason::NotFound,
        },
        Err(err) => {
            tracing::warn!(
                lookup_key = %key,
                error = %err,
                "Catalog lookup failed during normalization"
            );
            ItemResolution::Unresolved {
                item,
                reason: UnresolvedReason::LookupFailed,
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
