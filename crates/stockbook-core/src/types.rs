//! # Domain Types
//!
//! Core domain types used throughout Stockbook.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │     Product      │   │  HistoryRecord   │   │ TransactionEntry │    │
//! │  │  ──────────────  │   │  ──────────────  │   │  ──────────────  │    │
//! │  │  id              │   │  id              │   │  id              │    │
//! │  │  name (unique)   │   │  product_id (FK) │   │  product_name    │    │
//! │  │  running totals  │   │  qty, unit price │   │  kind: add/sell  │    │
//! │  │  available_stock │   │  total, date     │   │  qty, price, date│    │
//! │  └──────────────────┘   └──────────────────┘   └──────────────────┘    │
//! │                                                                         │
//! │  Product 1 ──► * add_history rows    (TransactionKind::Add)            │
//! │  Product 1 ──► * sell_history rows   (TransactionKind::Sell)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `HistoryRecord` is immutable once written; the only edit the system
//! allows is deleting it, which runs the ledger reversal in [`crate::ledger`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Transaction Kind
// =============================================================================

/// Which side of the ledger a history record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Stock received into inventory (add_history).
    Add,
    /// Stock sold out of inventory (sell_history).
    Sell,
}

impl TransactionKind {
    /// The backing table for this kind of record.
    pub const fn table(&self) -> &'static str {
        match self {
            TransactionKind::Add => "add_history",
            TransactionKind::Sell => "sell_history",
        }
    }

    /// Lowercase tag used in merged listings ("add" / "sell").
    pub const fn label(&self) -> &'static str {
        match self {
            TransactionKind::Add => "add",
            TransactionKind::Sell => "sell",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A tracked product with its authoritative running totals (the ledger).
///
/// ## Invariant
/// After every completed operation:
/// `available_stock == total_added_qty - total_sold_qty`
///
/// Totals are maintained incrementally for O(1) mutation cost; they are
/// never recomputed from history on read. The deletion protocol keeps them
/// in sync when history is edited (see [`crate::ledger`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Database identifier (autoincrement).
    pub id: i64,

    /// Unique product name - the lookup key callers use.
    /// Matching is case-sensitive and exact.
    pub name: String,

    /// Units ever added, across surviving add_history rows.
    pub total_added_qty: i64,

    /// Amount spent on additions, in cents.
    pub total_added_cents: i64,

    /// Units ever sold, across surviving sell_history rows.
    pub total_sold_qty: i64,

    /// Amount received from sales, in cents.
    pub total_sold_cents: i64,

    /// Units currently on hand. Transiently negative only after an
    /// out-of-order add-record deletion (allow-and-flag policy).
    pub available_stock: i64,

    /// When the product was first seen.
    pub created_at: DateTime<Utc>,

    /// When the totals last changed.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a fresh product with zeroed totals.
    pub fn new(id: i64, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Product {
            id,
            name: name.into(),
            total_added_qty: 0,
            total_added_cents: 0,
            total_sold_qty: 0,
            total_sold_cents: 0,
            available_stock: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total amount spent on additions as Money.
    #[inline]
    pub fn total_added_amount(&self) -> Money {
        Money::from_cents(self.total_added_cents)
    }

    /// Total amount received from sales as Money.
    #[inline]
    pub fn total_sold_amount(&self) -> Money {
        Money::from_cents(self.total_sold_cents)
    }

    /// Checks the ledger invariant. Mutations recompute `available_stock`,
    /// so this only fails on corrupted external state.
    pub fn stock_is_consistent(&self) -> bool {
        self.available_stock == self.total_added_qty - self.total_sold_qty
    }
}

// =============================================================================
// History Record
// =============================================================================

/// One immutable add or sell event. Both history tables share this shape;
/// the owning [`TransactionKind`] travels alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct HistoryRecord {
    /// Database identifier (autoincrement, monotonically increasing).
    pub id: i64,

    /// Owning product (foreign key).
    pub product_id: i64,

    /// Units moved. Always positive.
    pub quantity: i64,

    /// Price per unit in cents. Never negative.
    pub unit_price_cents: i64,

    /// `quantity * unit_price_cents`, stored so reversals never re-derive it.
    pub total_cents: i64,

    /// Calendar date supplied by the caller, canonical `YYYY-MM-DD`.
    /// Compared lexicographically in range queries.
    pub date: String,

    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Total amount as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Transaction Entry (merged listing)
// =============================================================================

/// One row of the merged add/sell history listing, tagged with its kind and
/// joined to the owning product's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionEntry {
    /// History-record id within its own table (used for deletion).
    pub id: i64,

    /// Transaction date (canonical sortable string).
    pub date: String,

    /// Owning product's name.
    pub product_name: String,

    /// "add" or "sell".
    pub transaction_type: TransactionKind,

    /// Units moved.
    pub quantity: i64,

    /// Price per unit in cents.
    pub unit_price_cents: i64,

    /// Line total in cents.
    pub total_cents: i64,
}

// =============================================================================
// Product Analytics
// =============================================================================

/// Per-product financial analytics for the enhanced summary.
///
/// Profit/loss uses the *average* historical purchase price as cost basis,
/// not FIFO/LIFO lot matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAnalytics {
    /// The product's stored totals, verbatim.
    #[serde(flatten)]
    pub product: Product,

    /// `total_added_amount / total_added_qty`, rounded to the cent.
    /// Absent when nothing was ever added.
    pub avg_purchase_cents: Option<i64>,

    /// `total_sold_amount / total_sold_qty`, rounded to the cent.
    /// Absent when nothing was ever sold.
    pub avg_selling_cents: Option<i64>,

    /// `total_sold_amount - avg_purchase_price * total_sold_qty`.
    /// Absent when the average purchase price is undefined.
    pub profit_loss_cents: Option<i64>,
}

impl ProductAnalytics {
    /// Derives analytics from a product's running totals.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use stockbook_core::money::Money;
    /// use stockbook_core::types::{Product, ProductAnalytics};
    ///
    /// let mut p = Product::new(1, "Widget", Utc::now());
    /// p.apply_add(10, Money::from_cents(200));
    /// p.apply_sell(4, Money::from_cents(400)).unwrap();
    ///
    /// let a = ProductAnalytics::derive(&p);
    /// assert_eq!(a.avg_purchase_cents, Some(200));  // $2.00
    /// assert_eq!(a.avg_selling_cents, Some(400));   // $4.00
    /// assert_eq!(a.profit_loss_cents, Some(800));   // $16.00 - $2.00*4
    /// ```
    pub fn derive(product: &Product) -> Self {
        let avg_purchase = product
            .total_added_amount()
            .checked_div_quantity(product.total_added_qty);
        let avg_selling = product
            .total_sold_amount()
            .checked_div_quantity(product.total_sold_qty);

        // Cost basis is only meaningful once an average purchase price
        // exists; with no additions the P/L is reported as absent.
        let profit_loss = avg_purchase.map(|avg| {
            product.total_sold_amount() - avg.multiply_quantity(product.total_sold_qty)
        });

        ProductAnalytics {
            product: product.clone(),
            avg_purchase_cents: avg_purchase.map(|m| m.cents()),
            avg_selling_cents: avg_selling.map(|m| m.cents()),
            profit_loss_cents: profit_loss.map(|m| m.cents()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
