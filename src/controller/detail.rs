//! Product detail view: independent one-shot fetches for the record and its
//! movement history. No cross-fetch ordering; each slot settles on its own.

use crate::error::ApiError;
use crate::models::{Product, StockMovement};

/// A piece of view state fed by one fetch. Rendered as loading until the
/// fetch settles, either way.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Pending
    }
}

impl<T> Slot<T> {
    pub fn settle(&mut self, result: Result<T, ApiError>) {
        *self = match result {
            Ok(value) => Slot::Ready(value),
            Err(e) => Slot::Failed(e.to_string()),
        };
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Slot::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ProductDetailView {
    pub product: Slot<Product>,
    pub history: Slot<Vec<StockMovement>>,
}

impl ProductDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.product.is_pending() || self.history.is_pending()
    }
}
