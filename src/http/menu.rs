use actix_multipart::form::bytes::Bytes as UploadedFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::auth::{RoleGuard, VendorOrAdmin};
use crate::domain::menu::{MenuFilter, MenuItemPatch, NewMenuItem};
use crate::store::{ImageStore, MenuStore};

use super::ApiError;

// ============================================================================
// Menu Endpoints
// ============================================================================
//
// Create and update are multipart so an image can travel with the fields.
// Image bytes never touch the catalog store; they go through the opaque
// image collaborator, which hands back a URL.
//
// ============================================================================

#[derive(Debug, MultipartForm)]
pub struct MenuItemForm {
    pub name: Option<Text<String>>,
    pub price: Option<Text<f64>>,
    pub category: Option<Text<String>>,
    pub available: Option<Text<String>>,
    #[multipart(rename = "vendorId")]
    pub vendor_id: Option<Text<Uuid>>,
    #[multipart(limit = "5MB")]
    pub image: Option<UploadedFile>,
}

/// The client sends availability as a form string.
fn truthy(value: &str) -> bool {
    value == "true" || value == "1"
}

async fn upload_image(
    images: &dyn ImageStore,
    file: UploadedFile,
) -> Result<String, ApiError> {
    let is_image = file.content_type.as_ref().is_some_and(|ct| {
        ct.type_().as_str() == "image"
            && matches!(
                ct.subtype().as_str(),
                "png" | "jpeg" | "jpg" | "webp" | "gif"
            )
    });
    if !is_image {
        return Err(ApiError::Validation(
            "Only image files are allowed (png, jpg, jpeg, webp, gif).".into(),
        ));
    }

    Ok(images
        .store(file.file_name.as_deref(), file.data.to_vec())
        .await?)
}

/// GET /menu?vendor=&category=&search=
pub async fn list_items(
    query: web::Query<MenuFilter>,
    store: web::Data<dyn MenuStore>,
) -> Result<HttpResponse, ApiError> {
    let items = store.find(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /menu/{id}
pub async fn get_item(
    path: web::Path<Uuid>,
    store: web::Data<dyn MenuStore>,
) -> Result<HttpResponse, ApiError> {
    let item = store
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Menu item not found".into()))?;
    Ok(HttpResponse::Ok().json(item))
}

/// POST /menu (multipart)
pub async fn create_item(
    _guard: RoleGuard<VendorOrAdmin>,
    MultipartForm(form): MultipartForm<MenuItemForm>,
    store: web::Data<dyn MenuStore>,
    images: web::Data<dyn ImageStore>,
) -> Result<HttpResponse, ApiError> {
    let name = form
        .name
        .map(|t| t.0)
        .filter(|name| !name.trim().is_empty());
    let price = form.price.map(|t| t.0);
    let category = form
        .category
        .map(|t| t.0)
        .filter(|category| !category.trim().is_empty());

    let (Some(name), Some(price), Some(category)) = (name, price, category) else {
        return Err(ApiError::Validation(
            "Name, price, and category are required.".into(),
        ));
    };
    let Some(vendor_id) = form.vendor_id.map(|t| t.0) else {
        return Err(ApiError::Validation("vendorId is required.".into()));
    };

    let image_url = match form.image {
        Some(file) => Some(upload_image(images.get_ref(), file).await?),
        None => None,
    };

    let item = store
        .create(NewMenuItem {
            name,
            price,
            category,
            available: form.available.map(|t| truthy(&t.0)).unwrap_or(true),
            image_url,
            vendor_id,
        })
        .await?;

    tracing::info!(item_id = %item.id, vendor_id = %item.vendor_id, "Menu item created");
    Ok(HttpResponse::Created().json(item))
}

/// PUT /menu/{id} (multipart, partial)
pub async fn update_item(
    _guard: RoleGuard<VendorOrAdmin>,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<MenuItemForm>,
    store: web::Data<dyn MenuStore>,
    images: web::Data<dyn ImageStore>,
) -> Result<HttpResponse, ApiError> {
    let image_url = match form.image {
        Some(file) => Some(upload_image(images.get_ref(), file).await?),
        None => None,
    };

    let patch = MenuItemPatch {
        name: form.name.map(|t| t.0),
        price: form.price.map(|t| t.0),
        category: form.category.map(|t| t.0),
        available: form.available.map(|t| truthy(&t.0)),
        image_url,
        vendor_id: form.vendor_id.map(|t| t.0),
    };

    let item = store
        .update(path.into_inner(), patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Menu item not found".into()))?;
    Ok(HttpResponse::Ok().json(item))
}

/// DELETE /menu/{id}
pub async fn delete_item(
    _guard: RoleGuard<VendorOrAdmin>,
    path: web::Path<Uuid>,
    store: web::Data<dyn MenuStore>,
) -> Result<HttpResponse, ApiError> {
    let deleted = store.delete(path.into_inner()).await?;
    if !deleted {
        return Err(ApiError::NotFound("Menu item not found".into()));
    }
    Ok(HttpResponse::NoContent().finish())
}

// ============================================================================
// Endpoint Tests
// ============================================================================
