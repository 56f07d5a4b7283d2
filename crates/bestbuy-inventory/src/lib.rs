//! # bestbuy-inventory: Startup Configuration
//!
//! Loads the initial product list and promotion assignments from TOML and
//! builds a [`bestbuy_core::Store`] from them.
//!
//! ```text
//! inventory.toml ──► InventoryConfig::load ──► validate ──► build_store ──► Store
//!                        ▲
//!                        └── BESTBUY_INVENTORY, BESTBUY_STORE_NAME
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Inventory file format, load order and store construction
//! - [`report`] - Text and JSON stock reports
//! - [`error`] - Inventory error types

pub mod config;
pub mod error;
pub mod report;

pub use config::{InventoryConfig, ProductEntry, PromotionEntry, StoreSettings};
pub use error::{InventoryError, InventoryResult};
pub use report::StockReport;
