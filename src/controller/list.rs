//! The live product list: filters, pagination cursors, and the merge of
//! fetched pages with pushed updates.
//!
//! Ordering model: for a given product id the displayed record is the result
//! of the most recently *settled* fetch or push. Both paths replace records
//! wholesale, so last-settled-wins needs no sequence numbers; a slow refetch
//! that settles after a newer push can briefly win, a stale window bounded
//! by one round trip and healed by the next push or refetch.

use crate::api::products::ProductQuery;
use crate::error::ApiError;
use crate::live::FeedEvent;
use crate::models::{Page, Product};
use std::time::Duration;
use tokio::time::Instant;

/// Quiet period before debounced filter edits fire.
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(500);

/// Draft filter state, edited freely without triggering fetches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub search: String,
    pub sale_price_gt: Option<f64>,
    pub sale_price_lt: Option<f64>,
}

impl Filters {
    fn to_query(&self, category: Option<i64>) -> ProductQuery {
        ProductQuery {
            search: if self.search.is_empty() {
                None
            } else {
                Some(self.search.clone())
            },
            sale_price_gt: self.sale_price_gt,
            sale_price_lt: self.sale_price_lt,
            category,
            // Applying filters always lands on the first page.
            page: None,
        }
    }
}

/// Deadline state machine for the debounced filter variant.
///
/// Every edit restarts the quiet period; only the last pending edit can
/// fire, and teardown cancels whatever is pending.
#[derive(Debug, Default)]
pub struct FilterDebouncer {
    pending: Option<(Instant, Filters)>,
}

impl FilterDebouncer {
    pub fn edit(&mut self, filters: Filters, now: Instant) {
        self.pending = Some((now + FILTER_DEBOUNCE, filters));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Hand back the pending filters once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<Filters> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => {
                self.pending.take().map(|(_, filters)| filters)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// How to (re)fetch the current page: a filter query for the first page, or
/// an opaque cursor URL the server handed back. The client never fabricates
/// page tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchSpec {
    Query(ProductQuery),
    Cursor(String),
}

/// Cursor state from the last settled fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageInfo {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub count: u64,
}

/// State for the filtered, paginated, live-updating product list.
pub struct ProductListController {
    /// Fixed category scope (route parameter), applied to every query.
    category: Option<i64>,
    draft: Filters,
    active: ProductQuery,
    /// What produced the page currently on screen; mutations refetch this.
    source: FetchSpec,
    items: Vec<Product>,
    page: PageInfo,
    error: Option<String>,
    debouncer: FilterDebouncer,
}

impl ProductListController {
    pub fn new(category: Option<i64>) -> Self {
        let active = Filters::default().to_query(category);
        Self {
            category,
            draft: Filters::default(),
            source: FetchSpec::Query(active.clone()),
            active,
            items: Vec::new(),
            page: PageInfo::default(),
            error: None,
            debouncer: FilterDebouncer::default(),
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn page(&self) -> &PageInfo {
        &self.page
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &Filters {
        &self.draft
    }

    pub fn active_query(&self) -> &ProductQuery {
        &self.active
    }

    /// Serialized active filter set; what the browser client would put in
    /// the location bar to make the view bookmarkable.
    pub fn query_string(&self) -> String {
        self.active.query_string()
    }

    /// Edit the draft only; no fetch is implied.
    pub fn edit_filters(&mut self, filters: Filters) {
        self.draft = filters;
    }

    /// Debounced variant: update the draft and restart the quiet period.
    pub fn edit_filters_debounced(&mut self, filters: Filters, now: Instant) {
        self.draft = filters.clone();
        self.debouncer.edit(filters, now);
    }

    /// Promote the draft to the active query and reset to the first page.
    pub fn apply_filters(&mut self) -> FetchSpec {
        self.debouncer.cancel();
        self.active = self.draft.to_query(self.category);
        self.source = FetchSpec::Query(self.active.clone());
        self.source.clone()
    }

    pub fn clear_filters(&mut self) -> FetchSpec {
        self.draft = Filters::default();
        self.apply_filters()
    }

    /// Fire the pending debounced edit if its quiet period has elapsed.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<FetchSpec> {
        let filters = self.debouncer.poll(now)?;
        self.draft = filters;
        Some(self.apply_filters())
    }

    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Cancel pending timers. The feed handle is owned by the driver and
    /// closed there; nothing here may fire afterwards.
    pub fn teardown(&mut self) {
        self.debouncer.cancel();
    }

    /// Refetch whatever produced the current page (used after mutations).
    pub fn refresh_spec(&self) -> FetchSpec {
        self.source.clone()
    }

    /// Navigate via the server-provided cursor, if there is a next page.
    pub fn goto_next(&mut self) -> Option<FetchSpec> {
        let url = self.page.next.clone()?;
        self.source = FetchSpec::Cursor(url);
        Some(self.source.clone())
    }

    pub fn goto_previous(&mut self) -> Option<FetchSpec> {
        let url = self.page.previous.clone()?;
        self.source = FetchSpec::Cursor(url);
        Some(self.source.clone())
    }

    /// Apply a settled fetch. Success replaces items and cursors wholesale;
    /// failure raises the page-level error and leaves the previous state
    /// untouched.
    pub fn apply_fetch(&mut self, result: Result<Page<Product>, ApiError>) {
        match result {
            Ok(page) => {
                self.items = page.results;
                self.page = PageInfo {
                    next: page.next,
                    previous: page.previous,
                    count: page.count,
                };
                self.error = None;
            }
            Err(e) => {
                tracing::debug!("product fetch failed: {e}");
                self.error = Some("Could not fetch products.".to_string());
            }
        }
    }

    /// Merge one push event. A matching id is replaced wholesale; an unknown
    /// id is ignored — pushed creates do not appear until the next fetch.
    /// Returns whether anything changed.
    pub fn apply_event(&mut self, event: FeedEvent) -> bool {
        match event {
            FeedEvent::Update(product) => {
                match self.items.iter_mut().find(|p| p.id == product.id) {
                    Some(slot) => {
                        *slot = product;
                        true
                    }
                    None => false,
                }
            }
        }
    }
}
