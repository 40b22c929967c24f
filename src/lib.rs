//! Inventory API: products, categories and suppliers over a relational store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{NameCase, Settings, StoreBackend};
pub use error::{AppError, ConfigError, ConflictKind, Entity, ErrorBody};
pub use routes::{app, common_routes, inventory_routes};
pub use service::{InventoryService, RequestValidator};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables, InventoryStore, MemoryStore, PgStore};
