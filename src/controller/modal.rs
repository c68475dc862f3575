//! Modal visibility as a single tagged state.
//!
//! One owner, one variant: opening a modal structurally closes whichever one
//! was open, so mutual exclusivity is not a convention to uphold.

use crate::models::Product;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState {
    #[default]
    None,
    Login,
    SignUp,
    Add,
    Edit(Product),
    AdjustStock(Product),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::None)
    }

    pub fn close(&mut self) {
        *self = ModalState::None;
    }

    /// The record the open modal operates on, if any.
    pub fn subject(&self) -> Option<&Product> {
        match self {
            ModalState::Edit(product) | ModalState::AdjustStock(product) => Some(product),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Supplier};

    fn product(id: i64) -> Product {
        Product {
            id,
            name: "Widget".to_string(),
            sku: "WID-001".to_string(),
            quantity: 5,
            sale_price: 19.99,
            cost_price: 7.50,
            reorder_point: 10,
            category: Category {
                id: 1,
                name: "Gadgets".to_string(),
                image_url: None,
            },
            supplier: Supplier {
                id: 2,
                name: "Acme".to_string(),
                contact_info: String::new(),
            },
            images: Vec::new(),
            forecast: None,
        }
    }

    #[test]
    fn starts_closed() {
        let modal = ModalState::default();
        assert!(!modal.is_open());
        assert!(modal.subject().is_none());
    }

    #[test]
    fn opening_a_modal_replaces_the_previous_one() {
        let mut modal = ModalState::Edit(product(1));
        modal = ModalState::AdjustStock(product(2));
        assert_eq!(modal.subject().map(|p| p.id), Some(2));
        // Only one modal can exist at a time by construction.
        assert!(matches!(modal, ModalState::AdjustStock(_)));
    }

    #[test]
    fn close_returns_to_none() {
        let mut modal = ModalState::AdjustStock(product(12));
        modal.close();
        assert_eq!(modal, ModalState::None);
    }
}
