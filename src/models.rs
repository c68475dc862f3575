//! Client-side views of the server's entities.
//!
//! Authoritative definitions live in the backend; these structs carry what
//! the views render plus what mutations send back. Records are only ever
//! replaced wholesale, never field-merged, so every struct derives
//! `PartialEq` to make replacement observable in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated identity, fetched from `/api/user/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl User {
    /// Admin, Manager, and Staff may adjust stock.
    pub fn can_adjust_stock(&self) -> bool {
        self.has_any_group(&["Admin", "Manager", "Staff"])
    }

    /// Admin and Manager may create, edit, and delete records.
    pub fn can_modify(&self) -> bool {
        self.has_any_group(&["Admin", "Manager"])
    }

    fn has_any_group(&self, names: &[&str]) -> bool {
        self.groups.iter().any(|g| names.contains(&g.as_str()))
    }
}

/// Access/refresh token pair issued by `/api/token/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact_info: String,
}

/// An ordered product image; `url` points into external image storage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    #[serde(rename = "image")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    #[serde(with = "decimal_string")]
    pub sale_price: f64,
    #[serde(with = "decimal_string")]
    pub cost_price: f64,
    #[serde(default)]
    pub reorder_point: u32,
    pub category: Category,
    pub supplier: Supplier,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    /// Only populated on detail fetches; list responses omit it.
    #[serde(default)]
    pub forecast: Option<SalesForecast>,
}

/// Per-product forecast computed by the external analytics engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesForecast {
    pub historical: HistoricalSales,
    #[serde(default)]
    pub forecast: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoricalSales {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: Vec<f64>,
}

/// Append-only stock-movement log entry; read-only from the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockMovement {
    pub id: i64,
    pub product: i64,
    pub quantity_change: i64,
    pub reason: String,
    #[serde(default)]
    pub user: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// One page of a list endpoint. `next` and `previous` are opaque URLs
/// returned by the server; the client never constructs page tokens itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub count: u64,
}

/// Aggregates from `/api/analytics/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardSummary {
    #[serde(with = "decimal_string")]
    pub total_inventory_value: f64,
    pub total_products: u64,
    pub low_stock_items: u64,
    #[serde(default)]
    pub category_distribution: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryCount {
    #[serde(rename = "category__name")]
    pub category: String,
    pub count: u64,
}

/// Row from `/api/analytics/top-products/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopProduct {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub units_sold: u64,
    #[serde(default, with = "decimal_string_opt")]
    pub revenue: Option<f64>,
}

/// The server serializes decimal fields as JSON strings ("19.99"); accept
/// either a string or a bare number.
mod decimal_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid decimal string: {s:?}"))),
        }
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{value:.2}"))
    }
}

mod decimal_string_opt {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::decimal_string")] f64);

        Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
    }
}
