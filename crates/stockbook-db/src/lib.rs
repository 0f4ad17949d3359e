//! # stockbook-db: Storage and Service Layer for Stockbook
//!
//! This crate provides database access and the inventory operation surface
//! for the Stockbook inventory tracker. It uses SQLite for local storage
//! with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockbook Data Flow                               │
//! │                                                                         │
//! │  Caller (CLI, HTTP adapter, seed tool)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockbook-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌───────────────┐   │   │
//! │  │   │ InventorySvc  │   │  Repositories │   │  Migrations   │   │   │
//! │  │   │ (service.rs)  │──►│ (product.rs,  │   │  (embedded)   │   │   │
//! │  │   │               │   │  history.rs)  │   │               │   │   │
//! │  │   │ add_stock     │   │               │   │ 001_initial_  │   │   │
//! │  │   │ sell_stock    │   │ ProductRepo   │   │ schema.sql    │   │   │
//! │  │   │ delete_*      │   │ HistoryRepo   │   │               │   │   │
//! │  │   │ summaries     │   │ *_tx fns      │   │               │   │   │
//! │  │   └───────────────┘   └───────────────┘   └───────────────┘   │   │
//! │  │           │                                                     │   │
//! │  │           │ ledger math (apply/reverse, Money, validation)      │   │
//! │  │           ▼                                                     │   │
//! │  │      stockbook-core (pure, no I/O)                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (WAL mode, foreign keys on)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, history)
//! - [`service`] - The inventory operation surface
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockbook_db::{Database, DbConfig, InventoryService};
//!
//! let db = Database::new(DbConfig::new("path/to/stockbook.db")).await?;
//! let service = InventoryService::new(db);
//!
//! service.add_stock("Widget", 10, 250, "2025-10-01").await?;
//! let summary = service.summary().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use service::{
    DatabaseView, DateRangeSummary, DeleteOutcome, InventoryService, SellOutcome, ServiceError,
    ServiceResult, StockMovement,
};

// Repository re-exports for convenience
pub use repository::history::HistoryRepository;
pub use repository::product::ProductRepository;
