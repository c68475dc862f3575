//! Product endpoints: filtered listing, CRUD, and stock adjustment.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Page, Product};
use serde::Serialize;
use std::path::Path;

/// Request parameters for the product list.
///
/// Serialized names follow the server's filter syntax; empty fields are
/// omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub sale_price_gt: Option<f64>,
    pub sale_price_lt: Option<f64>,
    pub category: Option<i64>,
    pub page: Option<u32>,
}

impl ProductQuery {
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if let Some(gt) = self.sale_price_gt {
            pairs.push(("sale_price__gt".to_string(), gt.to_string()));
        }
        if let Some(lt) = self.sale_price_lt {
            pairs.push(("sale_price__lt".to_string(), lt.to_string()));
        }
        if let Some(category) = self.category {
            pairs.push(("category".to_string(), category.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        pairs
    }

    /// The serialized filter set, suitable for display as a bookmarkable
    /// query string.
    pub fn query_string(&self) -> String {
        self.to_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Fields for creating a product. Relations are written by id; the response
/// nests the full category/supplier records back.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub category_id: i64,
    pub supplier_id: i64,
    pub cost_price: f64,
    pub sale_price: f64,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_point: Option<u32>,
}

/// Partial update; only populated fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_point: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StockAdjustment {
    pub quantity_change: i64,
    pub reason: String,
}

impl ApiClient {
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        self.get_json("/api/products/", &query.to_pairs()).await
    }

    /// Fetch a page by the opaque cursor URL a previous response returned.
    pub async fn products_page(&self, cursor_url: &str) -> Result<Page<Product>, ApiError> {
        self.get_absolute(cursor_url).await
    }

    pub async fn product(&self, id: i64) -> Result<Product, ApiError> {
        self.get_json(&format!("/api/products/{id}/"), &[]).await
    }

    /// Create a product. The endpoint takes multipart form data so an image
    /// can ride along with the fields.
    pub async fn create_product(
        &self,
        new: &NewProduct,
        image: Option<&Path>,
    ) -> Result<Product, ApiError> {
        let mut form = reqwest::multipart::Form::new()
            .text("name", new.name.clone())
            .text("sku", new.sku.clone())
            .text("category_id", new.category_id.to_string())
            .text("supplier_id", new.supplier_id.to_string())
            .text("cost_price", format!("{:.2}", new.cost_price))
            .text("sale_price", format!("{:.2}", new.sale_price))
            .text("quantity", new.quantity.to_string());
        if let Some(reorder_point) = new.reorder_point {
            form = form.text("reorder_point", reorder_point.to_string());
        }
        if let Some(path) = image {
            form = form.part("image", image_part(path)?);
        }
        self.post_multipart("/api/products/", form).await
    }

    pub async fn update_product(
        &self,
        id: i64,
        patch: &ProductPatch,
        image: Option<&Path>,
    ) -> Result<Product, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in patch_fields(patch) {
            form = form.text(name, value);
        }
        if let Some(path) = image {
            form = form.part("image", image_part(path)?);
        }
        self.patch_multipart(&format!("/api/products/{id}/"), form)
            .await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/products/{id}/")).await
    }

    /// The product's QR code as PNG bytes, rendered server-side.
    pub async fn product_qrcode(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&format!("/api/products/{id}/qrcode/")).await
    }

    /// Adjust stock and log the movement; returns the updated record.
    pub async fn adjust_stock(
        &self,
        id: i64,
        adjustment: &StockAdjustment,
    ) -> Result<Product, ApiError> {
        self.post_json(&format!("/api/products/{id}/adjust_stock/"), adjustment)
            .await
    }
}

fn patch_fields(patch: &ProductPatch) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();
    if let Some(name) = &patch.name {
        fields.push(("name", name.clone()));
    }
    if let Some(sku) = &patch.sku {
        fields.push(("sku", sku.clone()));
    }
    if let Some(category_id) = patch.category_id {
        fields.push(("category_id", category_id.to_string()));
    }
    if let Some(supplier_id) = patch.supplier_id {
        fields.push(("supplier_id", supplier_id.to_string()));
    }
    if let Some(cost_price) = patch.cost_price {
        fields.push(("cost_price", format!("{cost_price:.2}")));
    }
    if let Some(sale_price) = patch.sale_price {
        fields.push(("sale_price", format!("{sale_price:.2}")));
    }
    if let Some(quantity) = patch.quantity {
        fields.push(("quantity", quantity.to_string()));
    }
    if let Some(reorder_point) = patch.reorder_point {
        fields.push(("reorder_point", reorder_point.to_string()));
    }
    fields
}

fn image_part(path: &Path) -> Result<reqwest::multipart::Part, ApiError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(reqwest::multipart::Part::bytes(bytes).file_name(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_serializes_to_nothing() {
        let query = ProductQuery::default();
        assert!(query.to_pairs().is_empty());
        assert_eq!(query.query_string(), "");
    }

    #[test]
    fn query_uses_server_filter_names() {
        let query = ProductQuery {
            search: Some("widget".to_string()),
            sale_price_gt: Some(10.0),
            sale_price_lt: Some(99.5),
            category: Some(5),
            page: Some(2),
        };
        assert_eq!(
            query.query_string(),
            "search=widget&sale_price__gt=10&sale_price__lt=99.5&category=5&page=2"
        );
    }

    #[test]
    fn blank_search_is_omitted() {
        let query = ProductQuery {
            search: Some(String::new()),
            ..Default::default()
        };
        assert!(query.to_pairs().is_empty());
    }

    #[test]
    fn patch_sends_only_populated_fields() {
        let patch = ProductPatch {
            sale_price: Some(24.99),
            quantity: Some(7),
            ..Default::default()
        };
        let fields = patch_fields(&patch);
        assert_eq!(
            fields,
            vec![
                ("sale_price", "24.99".to_string()),
                ("quantity", "7".to_string()),
            ]
        );
    }

    #[test]
    fn adjustment_serializes_signed_change() {
        let adjustment = StockAdjustment {
            quantity_change: -5,
            reason: "Sold item".to_string(),
        };
        let json = serde_json::to_value(&adjustment).unwrap();
        assert_eq!(json["quantity_change"], -5);
        assert_eq!(json["reason"], "Sold item");
    }
}
