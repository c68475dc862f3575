pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod live;
pub mod models;
pub mod render;

pub use api::{ApiClient, NoAuth, RequestSigner};
pub use auth::{AuthGate, Session, TokenStore};
pub use config::Config;
pub use error::ApiError;
