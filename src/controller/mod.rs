//! View-state controllers: pure state holders the async driver feeds with
//! settled fetches and push events. Keeping network I/O out of these types
//! is what makes the merge and debounce logic directly testable.

pub mod dashboard;
pub mod detail;
pub mod list;
pub mod modal;

pub use dashboard::DashboardView;
pub use detail::{ProductDetailView, Slot};
pub use list::{FetchSpec, Filters, PageInfo, ProductListController, FILTER_DEBOUNCE};
pub use modal::ModalState;
