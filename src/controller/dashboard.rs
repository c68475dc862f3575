//! Sales/forecast dashboard: parallel one-shot fetches into independent
//! slots, same model as the detail view.

use crate::controller::detail::Slot;
use crate::models::{DashboardSummary, TopProduct};

#[derive(Debug, Default)]
pub struct DashboardView {
    pub summary: Slot<DashboardSummary>,
    pub top_products: Slot<Vec<TopProduct>>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.summary.is_pending() || self.top_products.is_pending()
    }
}
