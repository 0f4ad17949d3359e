//! Integration tests for the inventory service.
//!
//! Every test runs against a fresh in-memory SQLite database with the real
//! migrations applied, so these exercise the full stack: validation, ledger
//! math, transaction boundaries, and SQL.

use stockbook_core::TransactionKind;
use stockbook_db::{Database, DbConfig, DeleteOutcome, InventoryService, SellOutcome, ServiceError};

/// Fresh isolated service for one test.
async fn service() -> InventoryService {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    InventoryService::new(db)
}

// =============================================================================
// Add / Sell
// =============================================================================

#[tokio::test]
async fn add_creates_product_with_running_totals() {
    let svc = service().await;

    let movement = svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();

    assert_eq!(movement.product.name, "Widget");
    assert_eq!(movement.product.total_added_qty, 10);
    assert_eq!(movement.product.total_added_cents, 2000);
    assert_eq!(movement.product.total_sold_qty, 0);
    assert_eq!(movement.product.available_stock, 10);
    assert!(movement.product.stock_is_consistent());
    assert_eq!(
        movement.message,
        "Successfully added 10 units to Widget at $2.00 each (Total: $20.00)"
    );
}

#[tokio::test]
async fn add_accumulates_onto_existing_product() {
    let svc = service().await;

    let first = svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();
    let second = svc.add_stock("Widget", 5, 300, "2025-10-02").await.unwrap();

    assert_eq!(second.product.id, first.product.id);
    assert_eq!(second.product.total_added_qty, 15);
    assert_eq!(second.product.total_added_cents, 3500);
    assert_eq!(second.product.available_stock, 15);

    // Still exactly one product
    assert_eq!(svc.summary().await.unwrap().len(), 1);
}

#[tokio::test]
async fn add_trims_product_name() {
    let svc = service().await;

    let movement = svc.add_stock("  Widget  ", 1, 100, "2025-10-01").await.unwrap();
    assert_eq!(movement.product.name, "Widget");

    // Follow-up add with the untrimmed spelling lands on the same product
    let again = svc.add_stock("Widget", 1, 100, "2025-10-02").await.unwrap();
    assert_eq!(again.product.total_added_qty, 2);
}

#[tokio::test]
async fn sell_updates_totals_and_stock() {
    let svc = service().await;

    svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();
    let outcome = svc.sell_stock("Widget", 3, 300, "2025-10-02").await.unwrap();

    let movement = match outcome {
        SellOutcome::Sold(m) => m,
        other => panic!("expected sale to go through, got {other:?}"),
    };

    assert_eq!(movement.product.total_added_qty, 10);
    assert_eq!(movement.product.total_added_cents, 2000);
    assert_eq!(movement.product.total_sold_qty, 3);
    assert_eq!(movement.product.total_sold_cents, 900);
    assert_eq!(movement.product.available_stock, 7);
    assert_eq!(
        movement.message,
        "Successfully sold 3 units of Widget at $3.00 each (Total: $9.00)"
    );
}

#[tokio::test]
async fn oversell_is_rejected_without_mutation() {
    let svc = service().await;

    svc.add_stock("Widget", 5, 200, "2025-10-01").await.unwrap();
    let outcome = svc.sell_stock("Widget", 8, 300, "2025-10-02").await.unwrap();

    match &outcome {
        SellOutcome::InsufficientStock {
            name,
            available,
            requested,
        } => {
            assert_eq!(name, "Widget");
            assert_eq!(*available, 5);
            assert_eq!(*requested, 8);
        }
        other => panic!("expected insufficient stock, got {other:?}"),
    }
    assert!(!outcome.success());
    assert_eq!(
        outcome.message(),
        "Insufficient stock! Only 5 units of Widget available, cannot sell 8"
    );

    // Nothing changed: totals intact, no sell row written
    let products = svc.summary().await.unwrap();
    assert_eq!(products[0].total_sold_qty, 0);
    assert_eq!(products[0].available_stock, 5);

    let view = svc.database_view().await.unwrap();
    assert!(view.sell_history.is_empty());
    assert_eq!(view.add_history.len(), 1);
}

#[tokio::test]
async fn sell_exact_available_stock_reaches_zero() {
    let svc = service().await;

    svc.add_stock("Widget", 5, 200, "2025-10-01").await.unwrap();
    let outcome = svc.sell_stock("Widget", 5, 300, "2025-10-02").await.unwrap();

    assert!(outcome.success());
    let products = svc.summary().await.unwrap();
    assert_eq!(products[0].available_stock, 0);
}

#[tokio::test]
async fn sell_unknown_product_is_an_error() {
    let svc = service().await;

    let err = svc
        .sell_stock("Nonexistent", 1, 100, "2025-10-01")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::ProductNotFound(name) if name == "Nonexistent"));
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn malformed_input_is_rejected_before_mutation() {
    let svc = service().await;

    // Non-positive quantity
    let err = svc.add_stock("Widget", 0, 100, "2025-10-01").await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // Negative unit price
    let err = svc.add_stock("Widget", 1, -100, "2025-10-01").await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // Blank name
    let err = svc.add_stock("   ", 1, 100, "2025-10-01").await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // Non-canonical dates
    for bad in ["2025-1-1", "10/01/2025", "2025-13-01", "not-a-date"] {
        let err = svc.add_stock("Widget", 1, 100, bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)), "accepted {bad}");
    }

    // None of the rejects left anything behind
    assert!(svc.summary().await.unwrap().is_empty());
}

#[tokio::test]
async fn zero_price_addition_is_legal() {
    let svc = service().await;

    let movement = svc.add_stock("Sample", 10, 0, "2025-10-01").await.unwrap();
    assert_eq!(movement.product.total_added_cents, 0);
    assert_eq!(movement.product.available_stock, 10);
}

// =============================================================================
// Summaries & Analytics
// =============================================================================

#[tokio::test]
async fn summary_lists_products_ordered_by_name() {
    let svc = service().await;

    svc.add_stock("Zebra", 1, 100, "2025-10-01").await.unwrap();
    svc.add_stock("Apple", 1, 100, "2025-10-01").await.unwrap();
    svc.add_stock("Mango", 1, 100, "2025-10-01").await.unwrap();

    let names: Vec<String> = svc
        .summary()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Apple", "Mango", "Zebra"]);

    assert_eq!(svc.product_names().await.unwrap(), vec!["Apple", "Mango", "Zebra"]);
}

#[tokio::test]
async fn enhanced_summary_derives_averages_and_profit() {
    let svc = service().await;

    // 10 @ $2.00 in, 4 @ $4.00 out
    svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();
    svc.sell_stock("Widget", 4, 400, "2025-10-02").await.unwrap();

    let analytics = svc.enhanced_summary().await.unwrap();
    assert_eq!(analytics.len(), 1);

    let row = &analytics[0];
    assert_eq!(row.avg_purchase_cents, Some(200));
    assert_eq!(row.avg_selling_cents, Some(400));
    // $16.00 revenue - $2.00 * 4 cost basis = $8.00
    assert_eq!(row.profit_loss_cents, Some(800));
}

#[tokio::test]
async fn enhanced_summary_handles_never_sold_products() {
    let svc = service().await;

    svc.add_stock("Shelfwarmer", 3, 1000, "2025-10-01").await.unwrap();

    let analytics = svc.enhanced_summary().await.unwrap();
    let row = &analytics[0];
    // $30.00 / 3 units
    assert_eq!(row.avg_purchase_cents, Some(1000));
    assert_eq!(row.avg_selling_cents, None);
    assert_eq!(row.profit_loss_cents, Some(0));
}

#[tokio::test]
async fn date_range_summary_aggregates_only_the_window() {
    let svc = service().await;

    svc.add_stock("Widget", 10, 200, "2025-09-15").await.unwrap();
    svc.add_stock("Widget", 5, 200, "2025-10-01").await.unwrap();
    svc.sell_stock("Widget", 3, 400, "2025-10-05").await.unwrap();
    svc.sell_stock("Widget", 2, 400, "2025-11-01").await.unwrap();

    let summary = svc
        .date_range_summary("2025-10-01", "2025-10-31")
        .await
        .unwrap();

    // Range aggregates cover October only
    assert_eq!(summary.total_added_qty_in_range, 5);
    assert_eq!(summary.total_added_cents_in_range, 1000);
    assert_eq!(summary.total_sold_qty_in_range, 3);
    assert_eq!(summary.total_sold_cents_in_range, 1200);

    // Product totals stay global, untouched by the window
    assert_eq!(summary.products[0].total_added_qty, 15);
    assert_eq!(summary.products[0].total_sold_qty, 5);
}

#[tokio::test]
async fn date_range_summary_boundary_dates_are_inclusive() {
    let svc = service().await;

    svc.add_stock("Widget", 1, 100, "2025-10-01").await.unwrap();
    svc.add_stock("Widget", 2, 100, "2025-10-31").await.unwrap();
    svc.add_stock("Widget", 4, 100, "2025-11-01").await.unwrap();

    let summary = svc
        .date_range_summary("2025-10-01", "2025-10-31")
        .await
        .unwrap();
    assert_eq!(summary.total_added_qty_in_range, 3);
}

#[tokio::test]
async fn empty_date_window_sums_to_zero() {
    let svc = service().await;

    svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();

    let summary = svc
        .date_range_summary("2030-01-01", "2030-12-31")
        .await
        .unwrap();

    assert_eq!(summary.total_added_qty_in_range, 0);
    assert_eq!(summary.total_added_cents_in_range, 0);
    assert_eq!(summary.total_sold_qty_in_range, 0);
    assert_eq!(summary.total_sold_cents_in_range, 0);
    // Products still listed in full
    assert_eq!(summary.products.len(), 1);
}

#[tokio::test]
async fn reads_do_not_mutate() {
    let svc = service().await;

    svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();
    svc.sell_stock("Widget", 3, 300, "2025-10-02").await.unwrap();

    let first = svc.summary().await.unwrap();
    let _ = svc.enhanced_summary().await.unwrap();
    let _ = svc.transaction_history(None, None).await.unwrap();
    let _ = svc.database_view().await.unwrap();
    let second = svc.summary().await.unwrap();

    assert_eq!(first, second);
}

// =============================================================================
// Transaction History
// =============================================================================

#[tokio::test]
async fn history_merges_both_kinds_most_recent_first() {
    let svc = service().await;

    svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();
    svc.sell_stock("Widget", 2, 300, "2025-10-03").await.unwrap();
    svc.add_stock("Gadget", 5, 500, "2025-10-02").await.unwrap();

    let entries = svc.transaction_history(None, None).await.unwrap();
    assert_eq!(entries.len(), 3);

    let dates: Vec<&str> = entries.iter().map(|e| e.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-10-03", "2025-10-02", "2025-10-01"]);

    assert_eq!(entries[0].transaction_type, TransactionKind::Sell);
    assert_eq!(entries[0].product_name, "Widget");
    assert_eq!(entries[0].total_cents, 600);
    assert_eq!(entries[1].product_name, "Gadget");
}

#[tokio::test]
async fn history_breaks_same_date_ties_deterministically() {
    let svc = service().await;

    // Same date: two adds then one sell
    svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();
    svc.add_stock("Widget", 5, 200, "2025-10-01").await.unwrap();
    svc.sell_stock("Widget", 1, 300, "2025-10-01").await.unwrap();

    let entries = svc.transaction_history(None, None).await.unwrap();
    assert_eq!(entries.len(), 3);

    // Adds before sells on equal dates, newest add first
    assert_eq!(entries[0].transaction_type, TransactionKind::Add);
    assert_eq!(entries[0].quantity, 5);
    assert_eq!(entries[1].transaction_type, TransactionKind::Add);
    assert_eq!(entries[1].quantity, 10);
    assert_eq!(entries[2].transaction_type, TransactionKind::Sell);
}

#[tokio::test]
async fn history_filters_only_when_both_bounds_present() {
    let svc = service().await;

    svc.add_stock("Widget", 1, 100, "2025-09-01").await.unwrap();
    svc.add_stock("Widget", 2, 100, "2025-10-01").await.unwrap();

    let filtered = svc
        .transaction_history(Some("2025-10-01"), Some("2025-10-31"))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].quantity, 2);

    // A lone bound is ignored: full listing comes back
    let start_only = svc.transaction_history(Some("2025-10-01"), None).await.unwrap();
    assert_eq!(start_only.len(), 2);
    let end_only = svc.transaction_history(None, Some("2025-09-30")).await.unwrap();
    assert_eq!(end_only.len(), 2);
}

// =============================================================================
// Deletion / Reversal
// =============================================================================

#[tokio::test]
async fn deleting_add_record_restores_prior_totals() {
    let svc = service().await;

    let first = svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();
    let before = first.product.clone();

    let second = svc.add_stock("Widget", 5, 300, "2025-10-02").await.unwrap();
    assert_eq!(second.product.total_added_qty, 15);

    let outcome = svc.delete_add_record(second.history_id).await.unwrap();
    let product = match outcome {
        DeleteOutcome::Deleted { product, message } => {
            assert_eq!(
                message,
                format!(
                    "Successfully deleted add history record (ID: {}). Product totals updated.",
                    second.history_id
                )
            );
            product
        }
        other => panic!("expected deletion, got {other:?}"),
    };

    // Totals match the pre-add snapshot exactly
    assert_eq!(product.total_added_qty, before.total_added_qty);
    assert_eq!(product.total_added_cents, before.total_added_cents);
    assert_eq!(product.available_stock, before.available_stock);
    assert!(product.stock_is_consistent());

    // The history row is gone
    let view = svc.database_view().await.unwrap();
    assert_eq!(view.add_history.len(), 1);
    assert_eq!(view.add_history[0].id, first.history_id);
}

#[tokio::test]
async fn deleting_sell_record_returns_stock() {
    let svc = service().await;

    svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();
    let outcome = svc.sell_stock("Widget", 4, 400, "2025-10-02").await.unwrap();
    let sale = match outcome {
        SellOutcome::Sold(m) => m,
        other => panic!("expected sale, got {other:?}"),
    };
    assert_eq!(sale.product.available_stock, 6);

    let outcome = svc.delete_sell_record(sale.history_id).await.unwrap();
    let product = match outcome {
        DeleteOutcome::Deleted { product, .. } => product,
        other => panic!("expected deletion, got {other:?}"),
    };

    assert_eq!(product.total_sold_qty, 0);
    assert_eq!(product.total_sold_cents, 0);
    assert_eq!(product.available_stock, 10);
    assert!(product.stock_is_consistent());
}

#[tokio::test]
async fn deleting_missing_record_is_a_business_outcome() {
    let svc = service().await;

    svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();

    let outcome = svc.delete_add_record(9999).await.unwrap();
    match &outcome {
        DeleteOutcome::NotFound { kind, id } => {
            assert_eq!(*kind, TransactionKind::Add);
            assert_eq!(*id, 9999);
        }
        other => panic!("expected not-found, got {other:?}"),
    }
    assert!(!outcome.success());
    assert_eq!(outcome.message(), "add history record with ID 9999 not found");

    // Nothing was touched
    let products = svc.summary().await.unwrap();
    assert_eq!(products[0].total_added_qty, 10);
}

#[tokio::test]
async fn add_and_sell_ids_are_independent_namespaces() {
    let svc = service().await;

    let add = svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();

    // No sell row with that id exists; the add row must survive
    let outcome = svc.delete_sell_record(add.history_id).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::NotFound { .. }));

    let view = svc.database_view().await.unwrap();
    assert_eq!(view.add_history.len(), 1);
}

#[tokio::test]
async fn deleting_add_record_can_drive_stock_negative() {
    let svc = service().await;

    let add = svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();
    svc.sell_stock("Widget", 8, 400, "2025-10-02").await.unwrap();

    // Reversing the only addition after 8 units already sold
    let outcome = svc.delete_add_record(add.history_id).await.unwrap();
    let product = match outcome {
        DeleteOutcome::Deleted { product, .. } => product,
        other => panic!("expected deletion, got {other:?}"),
    };

    assert_eq!(product.total_added_qty, 0);
    assert_eq!(product.total_sold_qty, 8);
    assert_eq!(product.available_stock, -8);
    // The invariant still holds even in the flagged negative state
    assert!(product.stock_is_consistent());

    // Later additions bring it back toward a sane shelf count
    let movement = svc.add_stock("Widget", 10, 200, "2025-10-03").await.unwrap();
    assert_eq!(movement.product.available_stock, 2);
}

// =============================================================================
// Diagnostics
// =============================================================================

#[tokio::test]
async fn database_view_dumps_everything() {
    let svc = service().await;

    svc.add_stock("Widget", 10, 200, "2025-10-01").await.unwrap();
    svc.add_stock("Gadget", 5, 500, "2025-10-01").await.unwrap();
    svc.sell_stock("Widget", 2, 300, "2025-10-02").await.unwrap();

    let view = svc.database_view().await.unwrap();
    assert_eq!(view.total_products, 2);
    assert_eq!(view.add_history.len(), 2);
    assert_eq!(view.sell_history.len(), 1);
    assert_eq!(view.total_transactions, 3);
}

#[tokio::test]
async fn history_ids_increase_monotonically() {
    let svc = service().await;

    let a = svc.add_stock("Widget", 1, 100, "2025-10-01").await.unwrap();
    let b = svc.add_stock("Widget", 1, 100, "2025-10-02").await.unwrap();
    let c = svc.add_stock("Widget", 1, 100, "2025-10-03").await.unwrap();

    assert!(a.history_id < b.history_id);
    assert!(b.history_id < c.history_id);
}
