//! Markdown rendering for terminal output. The views are plain strings so
//! they stay testable; only `print` touches the terminal.

use crate::controller::{PageInfo, Slot};
use crate::models::{
    Category, DashboardSummary, Product, StockMovement, Supplier, TopProduct, User,
};

pub fn print(markdown: &str) {
    termimad::print_text(markdown);
}

pub fn products_table(items: &[Product], page: &PageInfo, query_string: &str) -> String {
    let mut out = String::from("# Products\n");
    if !query_string.is_empty() {
        out.push_str(&format!("*filters: `{query_string}`*\n"));
    }
    out.push_str("|id|name|sku|category|stock|price|\n|-|-|-|-|-|-|\n");
    for p in items {
        out.push_str(&format!(
            "|{}|{}|{}|{}|{}|${:.2}|\n",
            p.id, p.name, p.sku, p.category.name, p.quantity, p.sale_price
        ));
    }
    out.push_str(&format!(
        "\n{} total — {}{}\n",
        page.count,
        if page.previous.is_some() { "[prev] " } else { "" },
        if page.next.is_some() { "[next]" } else { "" },
    ));
    out
}

pub fn product_detail(product: &Product) -> String {
    let mut out = format!("# {} ({})\n", product.name, product.sku);
    out.push_str(&format!(
        "* category: {}\n* supplier: {}\n* stock: **{}** (reorder at {})\n* sale price: ${:.2}\n* cost price: ${:.2}\n",
        product.category.name,
        product.supplier.name,
        product.quantity,
        product.reorder_point,
        product.sale_price,
        product.cost_price,
    ));
    for image in &product.images {
        out.push_str(&format!("* image: {}\n", image.url));
    }
    if let Some(forecast) = &product.forecast {
        out.push_str("\n## Forecast\n|month|sales|\n|-|-|\n");
        for (label, value) in forecast
            .historical
            .labels
            .iter()
            .zip(&forecast.historical.data)
        {
            out.push_str(&format!("|{label}|{value:.1}|\n"));
        }
        for (i, value) in forecast.forecast.iter().enumerate() {
            out.push_str(&format!("|Month +{}|{value:.1} (forecast)|\n", i + 1));
        }
    }
    out
}

pub fn movements_table(movements: &[StockMovement]) -> String {
    let mut out = String::from("# Stock movements\n|when|change|reason|user|\n|-|-|-|-|\n");
    for m in movements {
        out.push_str(&format!(
            "|{}|{:+}|{}|{}|\n",
            m.timestamp.format("%Y-%m-%d %H:%M"),
            m.quantity_change,
            m.reason,
            m.user.as_deref().unwrap_or("-"),
        ));
    }
    out
}

pub fn categories_table(items: &[Category]) -> String {
    let mut out = String::from("# Categories\n|id|name|\n|-|-|\n");
    for c in items {
        out.push_str(&format!("|{}|{}|\n", c.id, c.name));
    }
    out
}

pub fn suppliers_table(items: &[Supplier]) -> String {
    let mut out = String::from("# Suppliers\n|id|name|contact|\n|-|-|-|\n");
    for s in items {
        out.push_str(&format!("|{}|{}|{}|\n", s.id, s.name, s.contact_info));
    }
    out
}

pub fn dashboard(summary: &Slot<DashboardSummary>, top: &Slot<Vec<TopProduct>>) -> String {
    let mut out = String::from("# Dashboard\n");

    match summary {
        Slot::Pending => out.push_str("*loading summary...*\n"),
        Slot::Failed(message) => out.push_str(&format!("**summary unavailable:** {message}\n")),
        Slot::Ready(s) => {
            out.push_str(&format!(
                "* total inventory value: **${:.2}**\n* total products: **{}**\n* low-stock items: **{}**\n",
                s.total_inventory_value, s.total_products, s.low_stock_items
            ));
            if !s.category_distribution.is_empty() {
                out.push_str("\n## Products by category\n|category|count|\n|-|-|\n");
                for row in &s.category_distribution {
                    out.push_str(&format!("|{}|{}|\n", row.category, row.count));
                }
            }
        }
    }

    match top {
        Slot::Pending => out.push_str("\n*loading top products...*\n"),
        Slot::Failed(message) => {
            out.push_str(&format!("\n**top products unavailable:** {message}\n"))
        }
        Slot::Ready(rows) => {
            out.push_str("\n## Top sellers\n|name|sku|units|\n|-|-|-|\n");
            for row in rows {
                out.push_str(&format!("|{}|{}|{}|\n", row.name, row.sku, row.units_sold));
            }
        }
    }

    out
}

pub fn identity(user: &User) -> String {
    let groups = if user.groups.is_empty() {
        "none".to_string()
    } else {
        user.groups.join(", ")
    };
    format!("**{}** — groups: {groups}\n", user.username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Supplier as SupplierModel;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            sku: format!("SKU-{id}"),
            quantity: 4,
            sale_price: 19.99,
            cost_price: 7.5,
            reorder_point: 10,
            category: Category {
                id: 1,
                name: "Gadgets".to_string(),
                image_url: None,
            },
            supplier: SupplierModel {
                id: 2,
                name: "Acme".to_string(),
                contact_info: String::new(),
            },
            images: Vec::new(),
            forecast: None,
        }
    }

    #[test]
    fn products_table_lists_rows_and_count() {
        let page = PageInfo {
            next: Some("http://api.example/?page=2".to_string()),
            previous: None,
            count: 51,
        };
        let table = products_table(&[product(1, "Widget")], &page, "search=widget");
        assert!(table.contains("|1|Widget|SKU-1|Gadgets|4|$19.99|"));
        assert!(table.contains("51 total"));
        assert!(table.contains("[next]"));
        assert!(!table.contains("[prev]"));
        assert!(table.contains("search=widget"));
    }

    #[test]
    fn movements_table_formats_signed_changes() {
        let movement = StockMovement {
            id: 1,
            product: 12,
            quantity_change: -5,
            reason: "Sold item".to_string(),
            user: Some("sam".to_string()),
            timestamp: "2026-08-01T12:30:00Z".parse().unwrap(),
        };
        let table = movements_table(&[movement]);
        assert!(table.contains("|-5|Sold item|sam|"));
    }

    #[test]
    fn dashboard_renders_loading_slots() {
        let out = dashboard(&Slot::Pending, &Slot::Pending);
        assert!(out.contains("loading summary"));
        assert!(out.contains("loading top products"));
    }
}
