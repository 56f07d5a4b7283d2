//! # bestbuy-core: Pricing and Inventory Engine
//!
//! Products with stock levels, optional promotions, and a store that prices
//! shopping lists against current stock and active discounts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Best Buy Store Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Presentation (menus, prompts, printing) - external       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ listing, totals, order(lines)         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bestbuy-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │  product  │  │ promotion │  │   money   │  │   │
//! │  │   │   Store   │─►│  Product  │─►│ Promotion │  │   Money   │  │   │
//! │  │   │  order()  │  │ purchase()│  │  apply()  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NEVER PRINTS • SINGLE-THREADED • IN-MEMORY          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │          bestbuy-inventory (startup configuration)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`promotion`] - Pricing strategies (percentage, second half price, 3-for-2)
//! - [`product`] - Products, their variants and the purchase state machine
//! - [`store`] - Product collection, queries and the order pipeline
//! - [`shopping_list`] - Checked staging of order lines
//! - [`money`] - Integer-cent money type
//! - [`types`] - Discount rates and product ids
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use bestbuy_core::{Money, OrderLine, Product, Promotion, Store};
//!
//! let mut macbook = Product::new("MacBook Air M2", Money::from_major(1450), 100).unwrap();
//! macbook.set_promotion(Some(Promotion::second_item_half_price("Second Half price!").unwrap()));
//! let macbook_id = macbook.id();
//!
//! let mut store = Store::new(vec![macbook]);
//! let receipt = store.order(&[OrderLine::new(macbook_id, 2)]).unwrap();
//!
//! assert_eq!(receipt.original_total, Money::from_major(2900));
//! assert_eq!(receipt.discounted_total, Money::from_major(2175));
//! assert_eq!(store.total_quantity(), 98);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod product;
pub mod promotion;
pub mod shopping_list;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, OrderError, ValidationError};
pub use money::Money;
pub use product::{Product, ProductKind};
pub use promotion::{Promotion, PromotionRule};
pub use shopping_list::ShoppingList;
pub use store::{OrderLine, OrderReceipt, ReceiptLine, Store};
pub use types::{DiscountRate, ProductId};
