//! # stockbook-core: Pure Business Logic for Stockbook
//!
//! This crate is the **heart** of Stockbook, an inventory-tracking service.
//! It contains the ledger rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockbook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Caller (HTTP layer, CLI, tests)                  │   │
//! │  │    add_stock, sell_stock, summaries, delete_*_record            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockbook-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  ledger   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │apply_add  │  │   rules   │  │   │
//! │  │   │  History  │  │  (cents)  │  │apply_sell │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  stockbook-db (Database Layer)                  │   │
//! │  │        SQLite queries, migrations, transactional service        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, HistoryRecord, analytics)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`ledger`] - Running-total apply/reverse rules
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use stockbook_core::money::Money;
//! use stockbook_core::types::Product;
//!
//! let mut product = Product::new(1, "Widget", chrono::Utc::now());
//!
//! // Receive 10 units at $2.50 each
//! product.apply_add(10, Money::from_cents(250));
//! assert_eq!(product.available_stock, 10);
//! assert_eq!(product.total_added_cents, 2500);
//!
//! // Sell 3 units at $3.00 each
//! product.apply_sell(3, Money::from_cents(300)).unwrap();
//! assert_eq!(product.available_stock, 7);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockbook_core::Money` instead of
// `use stockbook_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Canonical calendar-date format for transaction dates.
///
/// Dates are stored as opaque strings and compared lexicographically, so
/// every caller must supply them in this sortable form. Range queries never
/// parse dates; only add/sell input validation does.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum length of a product name.
///
/// ## Business Reason
/// Product names come straight from operator input; the cap keeps reports
/// and receipts renderable.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
