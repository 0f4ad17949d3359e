//! # Inventory Service
//!
//! The operation surface of Stockbook: every caller-visible operation from
//! stock intake to analytics lives here, implemented over the injected
//! [`Database`] handle.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Inventory Service Operations                        │
//! │                                                                         │
//! │  add_stock ──────┐                                                     │
//! │  sell_stock ─────┤  one sqlx transaction each:                         │
//! │  delete_*_record ┘  ledger totals + history row, both or neither       │
//! │                                                                         │
//! │  summary ────────────┐                                                 │
//! │  date_range_summary ─┤  pool reads; WAL snapshots mean they never      │
//! │  enhanced_summary ───┤  observe a half-applied mutation                │
//! │  transaction_history ┤                                                 │
//! │  product_names ──────┘                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Faults vs. Business Outcomes
//! Insufficient stock on a sell and a missing record on a delete are not
//! errors: they come back as `Ok` values carrying a rejected outcome with a
//! human-readable message, so callers branch on structure instead of
//! parsing error text. Validation failures, unknown product names on sell,
//! and storage faults propagate as [`ServiceError`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::{history, product};
use stockbook_core::validation::{
    validate_date, validate_product_name, validate_quantity, validate_unit_price_cents,
};
use stockbook_core::{
    CoreError, HistoryRecord, Money, Product, ProductAnalytics, TransactionEntry,
    TransactionKind, ValidationError,
};

// =============================================================================
// Service Error
// =============================================================================

/// Faults surfaced by the inventory service.
///
/// Business rejections are *not* here - they are ordinary return values
/// ([`SellOutcome`], [`DeleteOutcome`]).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input, rejected before any mutation (4xx-equivalent).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unknown product name on a sell.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Storage fault.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Operation Outcomes
// =============================================================================

/// A completed stock mutation: the updated ledger snapshot, the id of the
/// history row written (or removed), and operator-facing copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    /// The product's running totals after the operation.
    pub product: Product,
    /// Id of the history record this operation wrote.
    pub history_id: i64,
    /// Human-readable confirmation message.
    pub message: String,
}

/// Result of a sell attempt.
///
/// Insufficient stock is a recoverable business condition, so it is a
/// variant here rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SellOutcome {
    /// The sale went through.
    Sold(StockMovement),
    /// Not enough stock; nothing was mutated.
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },
}

impl SellOutcome {
    /// Structured success flag for callers.
    pub fn success(&self) -> bool {
        matches!(self, SellOutcome::Sold(_))
    }

    /// Human-readable message for either branch.
    pub fn message(&self) -> String {
        match self {
            SellOutcome::Sold(movement) => movement.message.clone(),
            SellOutcome::InsufficientStock {
                name,
                available,
                requested,
            } => format!(
                "Insufficient stock! Only {available} units of {name} available, cannot sell {requested}"
            ),
        }
    }
}

/// Result of a history-record deletion.
///
/// A missing id means there is nothing to act on - a business outcome, not
/// a fault; no product is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// Record removed and the owning product's totals re-derived.
    Deleted {
        product: Product,
        message: String,
    },
    /// No record with that id.
    NotFound { kind: TransactionKind, id: i64 },
}

impl DeleteOutcome {
    /// Structured success flag for callers.
    pub fn success(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }

    /// Human-readable message for either branch.
    pub fn message(&self) -> String {
        match self {
            DeleteOutcome::Deleted { message, .. } => message.clone(),
            DeleteOutcome::NotFound { kind, id } => {
                format!("{kind} history record with ID {id} not found")
            }
        }
    }
}

/// Date-range summary: every product's current totals (unchanged) plus four
/// aggregates recomputed from history rows inside the inclusive window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangeSummary {
    pub products: Vec<Product>,
    pub total_added_qty_in_range: i64,
    pub total_added_cents_in_range: i64,
    pub total_sold_qty_in_range: i64,
    pub total_sold_cents_in_range: i64,
}

/// Full dump of the logical store, for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseView {
    pub products: Vec<Product>,
    pub add_history: Vec<HistoryRecord>,
    pub sell_history: Vec<HistoryRecord>,
    pub total_products: usize,
    pub total_transactions: usize,
}

// =============================================================================
// Inventory Service
// =============================================================================

/// The inventory-tracking operation surface.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./stockbook.db")).await?;
/// let service = InventoryService::new(db);
///
/// let movement = service.add_stock("Widget", 10, 250, "2025-10-01").await?;
/// let outcome = service.sell_stock("Widget", 3, 300, "2025-10-02").await?;
/// ```
#[derive(Debug, Clone)]
pub struct InventoryService {
    db: Database,
}

impl InventoryService {
    /// Creates a service over an injected store handle.
    pub fn new(db: Database) -> Self {
        InventoryService { db }
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Records a stock addition.
    ///
    /// Looks up or creates the product by exact name, applies the ledger
    /// add, and appends the add_history row - all in one transaction.
    ///
    /// ## Errors
    /// `ServiceError::Validation` when `quantity <= 0`, `unit_price < 0`,
    /// the name is empty, or the date is not canonical `YYYY-MM-DD`.
    pub async fn add_stock(
        &self,
        product_name: &str,
        quantity: i64,
        unit_price_cents: i64,
        date: &str,
    ) -> ServiceResult<StockMovement> {
        let name = validate_product_name(product_name)?;
        validate_quantity(quantity)?;
        validate_unit_price_cents(unit_price_cents)?;
        validate_date(date)?;

        let unit_price = Money::from_cents(unit_price_cents);
        let now = Utc::now();

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let mut p = match product::get_by_name_tx(&mut tx, &name).await? {
            Some(existing) => existing,
            None => product::insert_tx(&mut tx, &name, now).await?,
        };

        p.apply_add(quantity, unit_price);
        p.updated_at = now;
        product::update_totals_tx(&mut tx, &p).await?;

        let record =
            history::insert_tx(&mut tx, TransactionKind::Add, p.id, quantity, unit_price, date, now)
                .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            product = %p.name,
            quantity,
            unit_price_cents,
            available_stock = p.available_stock,
            "Stock added"
        );

        let total = unit_price.multiply_quantity(quantity);
        let message = format!(
            "Successfully added {quantity} units to {name} at {unit_price} each (Total: {total})"
        );

        Ok(StockMovement {
            product: p,
            history_id: record.id,
            message,
        })
    }

    /// Records a sale.
    ///
    /// ## Errors
    /// - `ServiceError::Validation` on malformed input
    /// - `ServiceError::ProductNotFound` when the name was never added
    ///
    /// Insufficient stock is **not** an error: it returns
    /// `Ok(SellOutcome::InsufficientStock { .. })` with nothing mutated.
    pub async fn sell_stock(
        &self,
        product_name: &str,
        quantity: i64,
        unit_price_cents: i64,
        date: &str,
    ) -> ServiceResult<SellOutcome> {
        let name = validate_product_name(product_name)?;
        validate_quantity(quantity)?;
        validate_unit_price_cents(unit_price_cents)?;
        validate_date(date)?;

        let unit_price = Money::from_cents(unit_price_cents);
        let now = Utc::now();

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let mut p = product::get_by_name_tx(&mut tx, &name)
            .await?
            .ok_or_else(|| ServiceError::ProductNotFound(name.clone()))?;

        match p.apply_sell(quantity, unit_price) {
            Ok(()) => {}
            Err(CoreError::InsufficientStock {
                name,
                available,
                requested,
            }) => {
                // Business rejection: roll the (read-only) transaction back
                // and report it as an ordinary outcome
                tx.rollback().await.map_err(DbError::from)?;
                info!(product = %name, available, requested, "Sale rejected: insufficient stock");
                return Ok(SellOutcome::InsufficientStock {
                    name,
                    available,
                    requested,
                });
            }
            // The ledger doesn't raise these today; propagate rather than
            // sell through if it ever grows new rejection reasons
            Err(CoreError::Validation(v)) => {
                tx.rollback().await.map_err(DbError::from)?;
                return Err(ServiceError::Validation(v));
            }
            Err(CoreError::ProductNotFound(missing)) => {
                tx.rollback().await.map_err(DbError::from)?;
                return Err(ServiceError::ProductNotFound(missing));
            }
        }

        p.updated_at = now;
        product::update_totals_tx(&mut tx, &p).await?;

        let record = history::insert_tx(
            &mut tx,
            TransactionKind::Sell,
            p.id,
            quantity,
            unit_price,
            date,
            now,
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            product = %p.name,
            quantity,
            unit_price_cents,
            available_stock = p.available_stock,
            "Stock sold"
        );

        let total = unit_price.multiply_quantity(quantity);
        let message = format!(
            "Successfully sold {quantity} units of {name} at {unit_price} each (Total: {total})"
        );

        Ok(SellOutcome::Sold(StockMovement {
            product: p,
            history_id: record.id,
            message,
        }))
    }

    /// Deletes an add-history record and reverses its effect on the owning
    /// product's totals.
    ///
    /// Reversing an add can legally drive `available_stock` negative when
    /// later sells already consumed the un-added units; that state is
    /// flagged with a warning, never rejected.
    pub async fn delete_add_record(&self, id: i64) -> ServiceResult<DeleteOutcome> {
        self.delete_record(TransactionKind::Add, id).await
    }

    /// Deletes a sell-history record and reverses its effect on the owning
    /// product's totals (stock is restored to what it would have been).
    pub async fn delete_sell_record(&self, id: i64) -> ServiceResult<DeleteOutcome> {
        self.delete_record(TransactionKind::Sell, id).await
    }

    /// The deletion/reversal protocol: look up the record, reverse its
    /// contribution to the ledger, remove the row - one transaction, so a
    /// failure between steps is never observable.
    async fn delete_record(&self, kind: TransactionKind, id: i64) -> ServiceResult<DeleteOutcome> {
        let now = Utc::now();

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        let record = match history::get_by_id_tx(&mut tx, kind, id).await? {
            Some(record) => record,
            None => {
                tx.rollback().await.map_err(DbError::from)?;
                info!(kind = %kind, id, "Delete rejected: record not found");
                return Ok(DeleteOutcome::NotFound { kind, id });
            }
        };

        let mut p = product::get_by_id_tx(&mut tx, record.product_id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", record.product_id))?;

        match kind {
            TransactionKind::Add => p.reverse_add(record.quantity, record.total_amount()),
            TransactionKind::Sell => p.reverse_sell(record.quantity, record.total_amount()),
        }
        p.updated_at = now;

        product::update_totals_tx(&mut tx, &p).await?;
        history::delete_by_id_tx(&mut tx, kind, id).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        if p.available_stock < 0 {
            // Integrity warning, not a failure: the deletion is legitimate
            // even though reality can't have negative units on a shelf
            warn!(
                product = %p.name,
                available_stock = p.available_stock,
                "Reversal left available stock negative"
            );
        }

        info!(kind = %kind, id, product = %p.name, "History record deleted");

        let message =
            format!("Successfully deleted {kind} history record (ID: {id}). Product totals updated.");

        Ok(DeleteOutcome::Deleted {
            product: p,
            message,
        })
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Global summary: every product's stored running totals, verbatim.
    pub async fn summary(&self) -> DbResult<Vec<Product>> {
        self.db.products().list_all().await
    }

    /// Date-range summary: current product totals plus four aggregates
    /// recomputed from history rows whose date falls in `[start, end]`.
    pub async fn date_range_summary(&self, start: &str, end: &str) -> DbResult<DateRangeSummary> {
        let products = self.db.products().list_all().await?;
        let history = self.db.history();

        let (added_qty, added_cents) =
            history.range_totals(TransactionKind::Add, start, end).await?;
        let (sold_qty, sold_cents) =
            history.range_totals(TransactionKind::Sell, start, end).await?;

        Ok(DateRangeSummary {
            products,
            total_added_qty_in_range: added_qty,
            total_added_cents_in_range: added_cents,
            total_sold_qty_in_range: sold_qty,
            total_sold_cents_in_range: sold_cents,
        })
    }

    /// Enhanced summary: per-product average prices and cost-basis
    /// profit/loss derived from the stored totals.
    pub async fn enhanced_summary(&self) -> DbResult<Vec<ProductAnalytics>> {
        let products = self.db.products().list_all().await?;
        Ok(products.iter().map(ProductAnalytics::derive).collect())
    }

    /// Distinct product names for selection UIs, ordered by name.
    pub async fn product_names(&self) -> DbResult<Vec<String>> {
        self.db.products().list_names().await
    }

    /// Merged add/sell history, most recent date first, optionally filtered
    /// to an inclusive date range (both bounds required to filter).
    pub async fn transaction_history(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> DbResult<Vec<TransactionEntry>> {
        let range = match (start, end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        };
        self.db.history().list_entries(range).await
    }

    /// Full dump of all three tables, for diagnostics.
    pub async fn database_view(&self) -> DbResult<DatabaseView> {
        let products = self.db.products().list_all().await?;
        let add_history = self.db.history().list_all(TransactionKind::Add).await?;
        let sell_history = self.db.history().list_all(TransactionKind::Sell).await?;

        let total_products = products.len();
        let total_transactions = add_history.len() + sell_history.len();

        Ok(DatabaseView {
            products,
            add_history,
            sell_history,
            total_products,
            total_transactions,
        })
    }
}
