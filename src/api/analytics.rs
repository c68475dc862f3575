//! Dashboard analytics. Computation happens in the external analytics
//! engine; these wrappers only fetch and decode.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{DashboardSummary, TopProduct};

impl ApiClient {
    pub async fn dashboard_summary(
        &self,
        range: Option<&str>,
    ) -> Result<DashboardSummary, ApiError> {
        let mut pairs = Vec::new();
        if let Some(range) = range {
            pairs.push(("range".to_string(), range.to_string()));
        }
        self.get_json("/api/analytics/", &pairs).await
    }

    pub async fn top_products(
        &self,
        range: Option<&str>,
        category: Option<i64>,
    ) -> Result<Vec<TopProduct>, ApiError> {
        let mut pairs = Vec::new();
        if let Some(range) = range {
            pairs.push(("range".to_string(), range.to_string()));
        }
        if let Some(category) = category {
            pairs.push(("category".to_string(), category.to_string()));
        }
        self.get_json("/api/analytics/top-products/", &pairs).await
    }
}
