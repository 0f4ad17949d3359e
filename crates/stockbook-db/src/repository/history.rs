//! # History Repository
//!
//! Database operations for the append-only transaction history.
//!
//! ## Two Tables, One Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_history and sell_history share a schema; TransactionKind picks    │
//! │  the table. Rows are immutable once written - the only mutation is     │
//! │  deletion, which the service pairs with a ledger reversal in the       │
//! │  same transaction.                                                      │
//! │                                                                         │
//! │  Date filters are inclusive BETWEEN on the TEXT date column:           │
//! │  lexicographic comparison over canonical YYYY-MM-DD strings. No        │
//! │  calendar parsing happens down here.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use chrono::{DateTime, Utc};
use stockbook_core::{HistoryRecord, Money, TransactionEntry, TransactionKind};

const HISTORY_COLUMNS: &str =
    "id, product_id, quantity, unit_price_cents, total_cents, date, created_at";

/// Repository for add/sell history operations.
#[derive(Debug, Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
}

impl HistoryRepository {
    /// Creates a new HistoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HistoryRepository { pool }
    }

    /// Gets one history record by id.
    pub async fn get_by_id(
        &self,
        kind: TransactionKind,
        id: i64,
    ) -> DbResult<Option<HistoryRecord>> {
        let record = sqlx::query_as::<_, HistoryRecord>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM {} WHERE id = ?1",
            kind.table()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists every record of one kind, in insertion order.
    pub async fn list_all(&self, kind: TransactionKind) -> DbResult<Vec<HistoryRecord>> {
        let records = sqlx::query_as::<_, HistoryRecord>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM {} ORDER BY id",
            kind.table()
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Lists records of one kind whose date falls in `[start, end]`
    /// (inclusive bounds, lexicographic comparison).
    pub async fn list_by_date_range(
        &self,
        kind: TransactionKind,
        start: &str,
        end: &str,
    ) -> DbResult<Vec<HistoryRecord>> {
        let records = sqlx::query_as::<_, HistoryRecord>(&format!(
            "SELECT {HISTORY_COLUMNS} FROM {} WHERE date BETWEEN ?1 AND ?2 ORDER BY id",
            kind.table()
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Sums quantity and amount over one kind's rows in `[start, end]`.
    ///
    /// Range aggregates are always derived fresh from history, never cached;
    /// an empty window sums to (0, 0).
    pub async fn range_totals(
        &self,
        kind: TransactionKind,
        start: &str,
        end: &str,
    ) -> DbResult<(i64, i64)> {
        let totals = sqlx::query_as::<_, (i64, i64)>(&format!(
            "SELECT COALESCE(SUM(quantity), 0), COALESCE(SUM(total_cents), 0) \
             FROM {} WHERE date BETWEEN ?1 AND ?2",
            kind.table()
        ))
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    /// Merges both history tables into one tagged listing, joined to the
    /// owning product's name.
    ///
    /// ## Ordering
    /// Date descending (most recent first). Same-date ties break by kind
    /// (adds before sells) then id descending, so the sequence is
    /// deterministic and testable.
    pub async fn list_entries(
        &self,
        range: Option<(&str, &str)>,
    ) -> DbResult<Vec<TransactionEntry>> {
        let date_filter = if range.is_some() {
            "WHERE h.date BETWEEN ?1 AND ?2"
        } else {
            ""
        };

        let sql = format!(
            r#"
            SELECT h.id AS id, h.date AS date, p.name AS product_name,
                   'add' AS transaction_type, h.quantity AS quantity,
                   h.unit_price_cents AS unit_price_cents, h.total_cents AS total_cents
            FROM add_history h JOIN products p ON p.id = h.product_id
            {date_filter}
            UNION ALL
            SELECT h.id, h.date, p.name,
                   'sell', h.quantity,
                   h.unit_price_cents, h.total_cents
            FROM sell_history h JOIN products p ON p.id = h.product_id
            {date_filter}
            ORDER BY date DESC, transaction_type ASC, id DESC
            "#
        );

        let mut query = sqlx::query_as::<_, TransactionEntry>(&sql);
        if let Some((start, end)) = range {
            query = query.bind(start).bind(end);
        }

        let entries = query.fetch_all(&self.pool).await?;

        debug!(count = entries.len(), filtered = range.is_some(), "Listed history entries");
        Ok(entries)
    }
}

// =============================================================================
// Transaction-Scoped Operations
// =============================================================================

/// Appends a history row inside an open transaction and returns it with its
/// auto-assigned (monotonically increasing) id.
///
/// The foreign key constraint rejects inserts whose `product_id` does not
/// resolve to an existing product.
pub async fn insert_tx(
    conn: &mut SqliteConnection,
    kind: TransactionKind,
    product_id: i64,
    quantity: i64,
    unit_price: Money,
    date: &str,
    now: DateTime<Utc>,
) -> DbResult<HistoryRecord> {
    let total = unit_price.multiply_quantity(quantity);

    debug!(
        kind = %kind,
        product_id,
        quantity,
        total_cents = total.cents(),
        "Appending history record"
    );

    let result = sqlx::query(&format!(
        "INSERT INTO {} (product_id, quantity, unit_price_cents, total_cents, date, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        kind.table()
    ))
    .bind(product_id)
    .bind(quantity)
    .bind(unit_price.cents())
    .bind(total.cents())
    .bind(date)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(HistoryRecord {
        id: result.last_insert_rowid(),
        product_id,
        quantity,
        unit_price_cents: unit_price.cents(),
        total_cents: total.cents(),
        date: date.to_string(),
        created_at: now,
    })
}

/// Gets one history record by id on an open transaction.
///
/// The deletion protocol reads the record inside its own transaction so the
/// reversal amounts match the row actually removed.
pub async fn get_by_id_tx(
    conn: &mut SqliteConnection,
    kind: TransactionKind,
    id: i64,
) -> DbResult<Option<HistoryRecord>> {
    let record = sqlx::query_as::<_, HistoryRecord>(&format!(
        "SELECT {HISTORY_COLUMNS} FROM {} WHERE id = ?1",
        kind.table()
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(record)
}

/// Removes a history row inside an open transaction.
///
/// ## Returns
/// `true` when a row was removed, `false` when the id did not exist.
pub async fn delete_by_id_tx(
    conn: &mut SqliteConnection,
    kind: TransactionKind,
    id: i64,
) -> DbResult<bool> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?1", kind.table()))
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
