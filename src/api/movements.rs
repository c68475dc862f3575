//! Stock-movement history. Read-only: movements are created server-side by
//! the adjust_stock action, never directly from here.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Page, StockMovement};

impl ApiClient {
    /// Movement log for one product, newest first.
    pub async fn stock_movements(
        &self,
        product_id: i64,
    ) -> Result<Page<StockMovement>, ApiError> {
        let pairs = vec![("product".to_string(), product_id.to_string())];
        self.get_json("/api/stock-movements/", &pairs).await
    }

    pub async fn stock_movements_page(
        &self,
        cursor_url: &str,
    ) -> Result<Page<StockMovement>, ApiError> {
        self.get_absolute(cursor_url).await
    }
}
