//! Command-line surface and command execution.
//!
//! Errors are caught at the command boundary: every command maps its failure
//! to a printed message and a non-zero exit, nothing propagates past `run`.

use crate::api::products::{NewProduct, ProductPatch, ProductQuery, StockAdjustment};
use crate::api::ApiClient;
use crate::auth::{AuthGate, Session, TokenStore};
use crate::config::Config;
use crate::controller::{
    DashboardView, FetchSpec, Filters, ModalState, ProductDetailView, ProductListController,
};
use crate::live::{self, FeedHandle};
use crate::render;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "stockpilot", version, about = "Terminal client for the inventory backend")]
pub struct Cli {
    /// Path to a config file (defaults to the per-user location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and persist the session tokens.
    Login {
        username: String,
        password: String,
    },
    /// Clear persisted tokens and the in-memory session.
    Logout,
    /// Show the current identity, validating the stored token.
    Whoami,
    /// Create a new account.
    Register {
        username: String,
        password: String,
    },
    /// Product views and mutations.
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    Categories {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    Suppliers {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Stock-movement history for one product.
    Movements { product: i64 },
    /// Sales dashboard: summary aggregates plus top sellers.
    Dashboard {
        #[arg(long)]
        range: Option<String>,
        #[arg(long)]
        category: Option<i64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductAction {
    /// One filtered page of products.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "price-over")]
        price_over: Option<f64>,
        #[arg(long = "price-under")]
        price_under: Option<f64>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Detail view: record, history, and forecast.
    Show { id: i64 },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        category: i64,
        #[arg(long)]
        supplier: i64,
        #[arg(long)]
        cost_price: f64,
        #[arg(long)]
        sale_price: f64,
        #[arg(long, default_value_t = 0)]
        quantity: u32,
        #[arg(long)]
        reorder_point: Option<u32>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sku: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        supplier: Option<i64>,
        #[arg(long)]
        cost_price: Option<f64>,
        #[arg(long)]
        sale_price: Option<f64>,
        #[arg(long)]
        quantity: Option<u32>,
        #[arg(long)]
        reorder_point: Option<u32>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete { id: i64 },
    /// Save the product's QR code image.
    Qrcode {
        id: i64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Adjust stock, logging a movement with the given reason.
    Adjust {
        id: i64,
        #[arg(allow_hyphen_values = true)]
        quantity_change: i64,
        #[arg(long, default_value = "Manual adjustment")]
        reason: String,
    },
    /// Live list view: filtered page kept fresh by the push channel.
    Watch {
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "price-over")]
        price_over: Option<f64>,
        #[arg(long = "price-under")]
        price_under: Option<f64>,
        #[arg(long)]
        category: Option<i64>,
    },
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let store = Arc::new(TokenStore::open(&config.token_path));
    let api = ApiClient::new(&config.api_url, store.clone());

    match cli.command {
        Command::Login { username, password } => {
            let mut gate = AuthGate::new(api, store);
            let user = gate.login(&username, &password).await?;
            render::print(&format!("Logged in as {}", render::identity(user)));
        }
        Command::Logout => {
            let mut gate = AuthGate::new(api, store);
            gate.logout();
            println!("Logged out.");
        }
        Command::Whoami => {
            let mut gate = AuthGate::new(api, store);
            match gate.bootstrap().await {
                Session::Authenticated(user) => render::print(&render::identity(user)),
                _ => println!("Not logged in."),
            }
        }
        Command::Register { username, password } => {
            let user = api.register(&username, &password).await?;
            println!("Account created for {}.", user.username);
        }
        Command::Products { action } => run_product_action(&api, &config, store, action).await?,
        Command::Categories { search, page } => {
            let page = api.list_categories(search.as_deref(), page).await?;
            render::print(&render::categories_table(&page.results));
        }
        Command::Suppliers { search, page } => {
            let page = api.list_suppliers(search.as_deref(), page).await?;
            render::print(&render::suppliers_table(&page.results));
        }
        Command::Movements { product } => {
            let page = api.stock_movements(product).await?;
            render::print(&render::movements_table(&page.results));
        }
        Command::Dashboard { range, category } => {
            let mut view = DashboardView::new();
            let (summary, top) = tokio::join!(
                api.dashboard_summary(range.as_deref()),
                api.top_products(range.as_deref(), category),
            );
            view.summary.settle(summary);
            view.top_products.settle(top);
            render::print(&render::dashboard(&view.summary, &view.top_products));
        }
    }

    Ok(())
}

async fn run_product_action(
    api: &ApiClient,
    config: &Config,
    store: Arc<TokenStore>,
    action: ProductAction,
) -> Result<()> {
    match action {
        ProductAction::List {
            search,
            price_over,
            price_under,
            category,
            page,
        } => {
            let query = ProductQuery {
                search,
                sale_price_gt: price_over,
                sale_price_lt: price_under,
                category,
                page,
            };
            let mut ctrl = ProductListController::new(category);
            ctrl.apply_fetch(api.list_products(&query).await);
            if let Some(message) = ctrl.error() {
                anyhow::bail!("{message}");
            }
            render::print(&render::products_table(
                ctrl.items(),
                ctrl.page(),
                &query.query_string(),
            ));
        }
        ProductAction::Show { id } => {
            let mut view = ProductDetailView::new();
            let (product, history) = tokio::join!(api.product(id), api.stock_movements(id));
            view.product.settle(product);
            view.history.settle(history.map(|page| page.results));

            match &view.product {
                crate::controller::Slot::Ready(product) => {
                    render::print(&render::product_detail(product));
                }
                crate::controller::Slot::Failed(message) => anyhow::bail!("{message}"),
                crate::controller::Slot::Pending => unreachable!("fetch settled above"),
            }
            if let Some(history) = view.history.value() {
                render::print(&render::movements_table(history));
            }
        }
        ProductAction::Add {
            name,
            sku,
            category,
            supplier,
            cost_price,
            sale_price,
            quantity,
            reorder_point,
            image,
        } => {
            let new = NewProduct {
                name,
                sku,
                category_id: category,
                supplier_id: supplier,
                cost_price,
                sale_price,
                quantity,
                reorder_point,
            };
            let product = api.create_product(&new, image.as_deref()).await?;
            println!("Created product {} (id {}).", product.name, product.id);
        }
        ProductAction::Update {
            id,
            name,
            sku,
            category,
            supplier,
            cost_price,
            sale_price,
            quantity,
            reorder_point,
            image,
        } => {
            let patch = ProductPatch {
                name,
                sku,
                category_id: category,
                supplier_id: supplier,
                cost_price,
                sale_price,
                quantity,
                reorder_point,
            };
            let product = api.update_product(id, &patch, image.as_deref()).await?;
            println!("Updated product {} (id {}).", product.name, product.id);
        }
        ProductAction::Delete { id } => {
            api.delete_product(id).await?;
            println!("Deleted product {id}.");
        }
        ProductAction::Qrcode { id, out } => {
            let bytes = api.product_qrcode(id).await?;
            let path = out.unwrap_or_else(|| PathBuf::from(format!("product-{id}-qrcode.png")));
            std::fs::write(&path, bytes)?;
            println!("Wrote QR code for product {id} to {}.", path.display());
        }
        ProductAction::Adjust {
            id,
            quantity_change,
            reason,
        } => {
            let adjustment = StockAdjustment {
                quantity_change,
                reason,
            };
            let product = api.adjust_stock(id, &adjustment).await?;
            println!(
                "Stock for {} (id {}) is now {}.",
                product.name, product.id, product.quantity
            );
        }
        ProductAction::Watch {
            search,
            price_over,
            price_under,
            category,
        } => {
            let filters = Filters {
                search: search.unwrap_or_default(),
                sale_price_gt: price_over,
                sale_price_lt: price_under,
            };
            watch(api, config, store, filters, category).await?;
        }
    }
    Ok(())
}

/// One line of input in the watch loop.
#[derive(Debug, Clone, PartialEq)]
enum WatchInput {
    Search(String),
    PriceOver(Option<f64>),
    PriceUnder(Option<f64>),
    Apply,
    Clear,
    Next,
    Prev,
    Refresh,
    Adjust {
        id: i64,
        quantity_change: i64,
        reason: String,
    },
    /// `adjust <id>` with no amount: open the interactive adjust prompt.
    AdjustOpen(i64),
    Quit,
    Help,
    Unknown(String),
}

fn parse_watch_input(line: &str) -> WatchInput {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "search" => WatchInput::Search(rest.to_string()),
        "over" => WatchInput::PriceOver(rest.parse().ok()),
        "under" => WatchInput::PriceUnder(rest.parse().ok()),
        "apply" => WatchInput::Apply,
        "clear" => WatchInput::Clear,
        "next" => WatchInput::Next,
        "prev" => WatchInput::Prev,
        "refresh" => WatchInput::Refresh,
        "adjust" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            match (parts.next(), parts.next()) {
                (Some(id), None) => match id.parse() {
                    Ok(id) => WatchInput::AdjustOpen(id),
                    Err(_) => WatchInput::Unknown(line.to_string()),
                },
                (Some(id), Some(change)) => {
                    let reason = parts
                        .next()
                        .map(str::to_string)
                        .unwrap_or_else(|| "Manual adjustment".to_string());
                    match (id.parse(), change.parse()) {
                        (Ok(id), Ok(quantity_change)) => WatchInput::Adjust {
                            id,
                            quantity_change,
                            reason,
                        },
                        _ => WatchInput::Unknown(line.to_string()),
                    }
                }
                _ => WatchInput::Unknown(line.to_string()),
            }
        }
        "quit" | "q" | "exit" => WatchInput::Quit,
        "help" | "?" => WatchInput::Help,
        "" => WatchInput::Help,
        _ => WatchInput::Unknown(line.to_string()),
    }
}

/// `<change> [reason]` as entered at the adjust prompt.
fn parse_adjustment(line: &str) -> Option<(i64, String)> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let change = parts.next()?.parse().ok()?;
    let reason = parts
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Manual adjustment")
        .to_string();
    Some((change, reason))
}

const WATCH_HELP: &str = "commands: search <text> | over <price> | under <price> | apply | clear \
| next | prev | refresh | adjust <id> [<change> [reason]] | quit";

/// The live list view. Filter edits debounce at 500ms, the push channel
/// keeps visible rows fresh, and mutations refetch the current page.
async fn watch(
    api: &ApiClient,
    config: &Config,
    store: Arc<TokenStore>,
    initial: Filters,
    category: Option<i64>,
) -> Result<()> {
    let mut ctrl = ProductListController::new(category);
    ctrl.edit_filters(initial);
    let spec = ctrl.apply_filters();
    fetch_into(api, &mut ctrl, spec).await;
    redraw(&ctrl);

    // One subscription per view, opened once, independent of filter and
    // page changes. A missing token or an unreachable channel degrades to
    // the non-live list; the view itself keeps running.
    let mut feed = open_feed(&config.ws_url, store.as_ref()).await;
    println!("{WATCH_HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut modal = ModalState::None;

    loop {
        let deadline = ctrl.debounce_deadline();
        let debounce = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };
        let push = async {
            match feed.as_mut() {
                Some(handle) => handle.recv().await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            event = push => match event {
                Some(event) => {
                    // Replacement only; no fetch is triggered by a push.
                    if ctrl.apply_event(event) {
                        redraw(&ctrl);
                    }
                }
                None => {
                    tracing::warn!("push channel disconnected");
                    feed = None;
                }
            },
            _ = debounce => {
                if let Some(spec) = ctrl.poll_debounce(Instant::now()) {
                    fetch_into(api, &mut ctrl, spec).await;
                    redraw(&ctrl);
                }
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_watch_line(api, &mut ctrl, &mut modal, &line).await {
                    break;
                }
            },
        }
    }

    // Unconditional teardown: cancel timers and close the feed whatever
    // state it is in. Closing an absent or already-closed feed is a no-op.
    ctrl.teardown();
    if let Some(mut handle) = feed.take() {
        handle.close();
    }
    Ok(())
}

/// Apply one input line; returns false when the loop should exit.
async fn handle_watch_line(
    api: &ApiClient,
    ctrl: &mut ProductListController,
    modal: &mut ModalState,
    line: &str,
) -> bool {
    // An open adjust prompt consumes input until it settles or is cancelled.
    if let ModalState::AdjustStock(product) = &*modal {
        let id = product.id;
        let trimmed = line.trim();
        if trimmed == "cancel" {
            modal.close();
            return true;
        }
        let Some((quantity_change, reason)) = parse_adjustment(trimmed) else {
            println!("enter <change> [reason], or cancel");
            return true;
        };
        let adjustment = StockAdjustment {
            quantity_change,
            reason,
        };
        match api.adjust_stock(id, &adjustment).await {
            Ok(_) => {
                modal.close();
                let spec = ctrl.refresh_spec();
                fetch_into(api, ctrl, spec).await;
                redraw(ctrl);
            }
            // The prompt stays open so the input can be corrected.
            Err(e) => println!("adjust failed: {e} (retry or cancel)"),
        }
        return true;
    }

    let now = Instant::now();
    match parse_watch_input(line) {
        WatchInput::Search(text) => {
            let mut filters = ctrl.draft().clone();
            filters.search = text;
            ctrl.edit_filters_debounced(filters, now);
        }
        WatchInput::PriceOver(value) => {
            let mut filters = ctrl.draft().clone();
            filters.sale_price_gt = value;
            ctrl.edit_filters_debounced(filters, now);
        }
        WatchInput::PriceUnder(value) => {
            let mut filters = ctrl.draft().clone();
            filters.sale_price_lt = value;
            ctrl.edit_filters_debounced(filters, now);
        }
        WatchInput::Apply => {
            let spec = ctrl.apply_filters();
            fetch_into(api, ctrl, spec).await;
            redraw(ctrl);
        }
        WatchInput::Clear => {
            let spec = ctrl.clear_filters();
            fetch_into(api, ctrl, spec).await;
            redraw(ctrl);
        }
        WatchInput::Next => {
            if let Some(spec) = ctrl.goto_next() {
                fetch_into(api, ctrl, spec).await;
                redraw(ctrl);
            }
        }
        WatchInput::Prev => {
            if let Some(spec) = ctrl.goto_previous() {
                fetch_into(api, ctrl, spec).await;
                redraw(ctrl);
            }
        }
        WatchInput::Refresh => {
            let spec = ctrl.refresh_spec();
            fetch_into(api, ctrl, spec).await;
            redraw(ctrl);
        }
        WatchInput::Adjust {
            id,
            quantity_change,
            reason,
        } => {
            let adjustment = StockAdjustment {
                quantity_change,
                reason,
            };
            match api.adjust_stock(id, &adjustment).await {
                Ok(_) => {
                    // Consistency over cleverness: refetch the current page
                    // rather than patching the row locally.
                    let spec = ctrl.refresh_spec();
                    fetch_into(api, ctrl, spec).await;
                    redraw(ctrl);
                }
                Err(e) => println!("adjust failed: {e}"),
            }
        }
        WatchInput::AdjustOpen(id) => match ctrl.items().iter().find(|p| p.id == id) {
            Some(product) => {
                println!(
                    "adjusting {} (id {}, stock {}): enter <change> [reason], or cancel",
                    product.name, product.id, product.quantity
                );
                *modal = ModalState::AdjustStock(product.clone());
            }
            None => println!("product {id} is not on this page"),
        },
        WatchInput::Quit => return false,
        WatchInput::Help => println!("{WATCH_HELP}"),
        WatchInput::Unknown(text) => println!("unrecognized: {text} ({WATCH_HELP})"),
    }
    true
}

async fn open_feed(ws_url: &str, signer: &dyn crate::api::RequestSigner) -> Option<FeedHandle> {
    match live::open(ws_url, signer).await {
        Ok(Some(handle)) => Some(handle),
        Ok(None) => {
            println!("(no session token; live updates disabled)");
            None
        }
        Err(e) => {
            tracing::warn!("push channel unavailable: {e}");
            println!("(push channel unavailable; live updates disabled)");
            None
        }
    }
}

async fn fetch_into(api: &ApiClient, ctrl: &mut ProductListController, spec: FetchSpec) {
    let result = match spec {
        FetchSpec::Query(query) => api.list_products(&query).await,
        FetchSpec::Cursor(url) => api.products_page(&url).await,
    };
    ctrl.apply_fetch(result);
}

fn redraw(ctrl: &ProductListController) {
    if let Some(message) = ctrl.error() {
        println!("error: {message}");
        return;
    }
    render::print(&render::products_table(
        ctrl.items(),
        ctrl.page(),
        &ctrl.query_string(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{NoAuth, RequestSigner};
    use crate::models::{Category, Page, Product, Supplier};

    fn sample_product(id: i64) -> Product {
        Product {
            id,
            name: "Widget".to_string(),
            sku: format!("SKU-{id}"),
            quantity: 10,
            sale_price: 19.99,
            cost_price: 7.50,
            reorder_point: 5,
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

    fn page_with(results: Vec<Product>) -> Page<Product> {
        let count = results.len() as u64;
        Page {
            results,
            next: None,
            previous: None,
            count,
        }
    }

    fn unroutable_api() -> ApiClient {
        ApiClient::new("http://127.0.0.1:1", Arc::new(NoAuth))
    }

    struct FixedToken;

    impl RequestSigner for FixedToken {
        fn bearer_token(&self) -> Option<String> {
            Some("tok".to_string())
        }
    }

    #[test]
    fn parse_watch_input_commands() {
        assert_eq!(
            parse_watch_input("search widget"),
            WatchInput::Search("widget".to_string())
        );
        assert_eq!(parse_watch_input("over 10.5"), WatchInput::PriceOver(Some(10.5)));
        assert_eq!(parse_watch_input("under"), WatchInput::PriceUnder(None));
        assert_eq!(parse_watch_input("next"), WatchInput::Next);
        assert_eq!(parse_watch_input("q"), WatchInput::Quit);
        assert_eq!(parse_watch_input(""), WatchInput::Help);
    }

    #[test]
    fn parse_watch_input_adjust() {
        assert_eq!(
            parse_watch_input("adjust 12 -5 Sold item"),
            WatchInput::Adjust {
                id: 12,
                quantity_change: -5,
                reason: "Sold item".to_string(),
            }
        );
        assert_eq!(
            parse_watch_input("adjust 12 7"),
            WatchInput::Adjust {
                id: 12,
                quantity_change: 7,
                reason: "Manual adjustment".to_string(),
            }
        );
        assert!(matches!(
            parse_watch_input("adjust twelve"),
            WatchInput::Unknown(_)
        ));
        // Bare id opens the interactive prompt.
        assert_eq!(parse_watch_input("adjust 12"), WatchInput::AdjustOpen(12));
    }

    #[test]
    fn parse_adjustment_defaults_the_reason() {
        assert_eq!(
            parse_adjustment("-5 Sold item"),
            Some((-5, "Sold item".to_string()))
        );
        assert_eq!(
            parse_adjustment("7"),
            Some((7, "Manual adjustment".to_string()))
        );
        assert!(parse_adjustment("five").is_none());
    }

    #[tokio::test]
    async fn watch_feed_degrades_when_push_channel_is_unreachable() {
        // A token is present but the channel is unreachable; the view must
        // keep running without live updates instead of erroring out.
        let feed = open_feed("ws://127.0.0.1:1/ws/products/", &FixedToken).await;
        assert!(feed.is_none());
    }

    #[tokio::test]
    async fn adjust_prompt_opens_for_visible_product_and_cancels() {
        let api = unroutable_api();
        let mut ctrl = ProductListController::new(None);
        ctrl.apply_fetch(Ok(page_with(vec![sample_product(12)])));
        let mut modal = ModalState::None;

        assert!(handle_watch_line(&api, &mut ctrl, &mut modal, "adjust 12").await);
        assert_eq!(modal.subject().map(|p| p.id), Some(12));

        assert!(handle_watch_line(&api, &mut ctrl, &mut modal, "cancel").await);
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn adjust_prompt_does_not_open_for_unknown_product() {
        let api = unroutable_api();
        let mut ctrl = ProductListController::new(None);
        ctrl.apply_fetch(Ok(page_with(vec![sample_product(12)])));
        let mut modal = ModalState::None;

        assert!(handle_watch_line(&api, &mut ctrl, &mut modal, "adjust 99").await);
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn adjust_prompt_stays_open_when_submission_fails() {
        let api = unroutable_api();
        let mut ctrl = ProductListController::new(None);
        ctrl.apply_fetch(Ok(page_with(vec![sample_product(12)])));
        let mut modal = ModalState::AdjustStock(sample_product(12));

        // The API is unroutable, so the submission fails; the prompt must
        // survive for a retry or cancel.
        assert!(handle_watch_line(&api, &mut ctrl, &mut modal, "-5 Sold item").await);
        assert!(modal.is_open());
    }

    #[test]
    fn cli_parses_product_subcommands() {
        let cli = Cli::try_parse_from([
            "stockpilot", "products", "list", "--search", "widget", "--price-over", "10",
        ])
        .unwrap();
        match cli.command {
            Command::Products {
                action:
                    ProductAction::List {
                        search, price_over, ..
                    },
            } => {
                assert_eq!(search.as_deref(), Some("widget"));
                assert_eq!(price_over, Some(10.0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_qrcode_subcommand() {
        let cli = Cli::try_parse_from([
            "stockpilot", "products", "qrcode", "7", "--out", "/tmp/q.png",
        ])
        .unwrap();
        match cli.command {
            Command::Products {
                action: ProductAction::Qrcode { id, out },
            } => {
                assert_eq!(id, 7);
                assert_eq!(out, Some(PathBuf::from("/tmp/q.png")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_negative_adjustment() {
        let cli = Cli::try_parse_from([
            "stockpilot", "products", "adjust", "12", "-5", "--reason", "Sold item",
        ])
        .unwrap();
        match cli.command {
            Command::Products {
                action:
                    ProductAction::Adjust {
                        id,
                        quantity_change,
                        reason,
                    },
            } => {
                assert_eq!(id, 12);
                assert_eq!(quantity_change, -5);
                assert_eq!(reason, "Sold item");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
