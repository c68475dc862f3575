//! Category and supplier reference collections: paginated and searchable.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, Page, Supplier};

fn list_pairs(search: Option<&str>, page: Option<u32>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Some(search) = search.filter(|s| !s.is_empty()) {
        pairs.push(("search".to_string(), search.to_string()));
    }
    if let Some(page) = page {
        pairs.push(("page".to_string(), page.to_string()));
    }
    pairs
}

impl ApiClient {
    pub async fn list_categories(
        &self,
        search: Option<&str>,
        page: Option<u32>,
    ) -> Result<Page<Category>, ApiError> {
        self.get_json("/api/categories/", &list_pairs(search, page))
            .await
    }

    pub async fn category(&self, id: i64) -> Result<Category, ApiError> {
        self.get_json(&format!("/api/categories/{id}/"), &[]).await
    }

    pub async fn list_suppliers(
        &self,
        search: Option<&str>,
        page: Option<u32>,
    ) -> Result<Page<Supplier>, ApiError> {
        self.get_json("/api/suppliers/", &list_pairs(search, page))
            .await
    }

    pub async fn supplier(&self, id: i64) -> Result<Supplier, ApiError> {
        self.get_json(&format!("/api/suppliers/{id}/"), &[]).await
    }
}
