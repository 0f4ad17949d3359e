//! # Product Repository
//!
//! Database operations for the product ledger rows.
//!
//! ## Key Operations
//! - Name lookup (the caller-facing key, case-sensitive exact match)
//! - Summary listings ordered by name (deterministic)
//! - Transaction-scoped insert and totals update
//!
//! ## Why Two Call Styles?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Reads (summaries, name listings) need no coordination:                │
//! │     repo.list_all()            → runs on any pool connection           │
//! │                                                                         │
//! │  Mutations must land atomically with a history row:                    │
//! │     let mut tx = pool.begin().await?;                                  │
//! │     update_totals_tx(&mut tx, &product).await?;                        │
//! │     history::insert_tx(&mut tx, ...).await?;                           │
//! │     tx.commit().await?;        → both or neither                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use chrono::{DateTime, Utc};
use stockbook_core::Product;

const PRODUCT_COLUMNS: &str = "id, name, total_added_qty, total_added_cents, \
     total_sold_qty, total_sold_cents, available_stock, created_at, updated_at";

/// Repository for product ledger reads.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its unique name (case-sensitive exact match).
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ?1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists every product with its stored running totals, ordered by name.
    ///
    /// This is the global summary read: totals come back verbatim, nothing
    /// is recomputed from history.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Lists distinct product names for selection UIs.
    ///
    /// Ordered by name so repeated calls return identical sequences.
    pub async fn list_names(&self) -> DbResult<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT name FROM products ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(names)
    }

    /// Counts products (for diagnostics and the seed guard).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Transaction-Scoped Operations
// =============================================================================

/// Gets a product by id on an open transaction.
///
/// The deletion protocol resolves the owning product on its own transaction
/// connection; reading through the pool would stall on single-connection
/// configurations while the transaction holds the write lock.
pub async fn get_by_id_tx(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(product)
}

/// Gets a product by name on an open transaction.
///
/// Mutations look the product up inside their own transaction so the totals
/// they update are the ones they read.
pub async fn get_by_name_tx(
    conn: &mut SqliteConnection,
    name: &str,
) -> DbResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ?1"
    ))
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(product)
}

/// Inserts a fresh product row with zeroed totals, returning it with its
/// assigned id.
///
/// Called on the first add referencing a new name.
pub async fn insert_tx(
    conn: &mut SqliteConnection,
    name: &str,
    now: DateTime<Utc>,
) -> DbResult<Product> {
    debug!(name = %name, "Creating product");

    let result = sqlx::query(
        "INSERT INTO products (name, created_at, updated_at) VALUES (?1, ?2, ?3)",
    )
    .bind(name)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(Product::new(result.last_insert_rowid(), name, now))
}

/// Writes a product's running totals back to its row.
///
/// The caller has already run the ledger math (apply/reverse) on the
/// in-memory snapshot; this persists the result.
pub async fn update_totals_tx(conn: &mut SqliteConnection, product: &Product) -> DbResult<()> {
    debug!(id = product.id, name = %product.name, "Updating product totals");

    let result = sqlx::query(
        r#"
        UPDATE products SET
            total_added_qty = ?2,
            total_added_cents = ?3,
            total_sold_qty = ?4,
            total_sold_cents = ?5,
            available_stock = ?6,
            updated_at = ?7
        WHERE id = ?1
        "#,
    )
    .bind(product.id)
    .bind(product.total_added_qty)
    .bind(product.total_added_cents)
    .bind(product.total_sold_qty)
    .bind(product.total_sold_cents)
    .bind(product.available_stock)
    .bind(product.updated_at)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Product", product.id));
    }

    Ok(())
}
