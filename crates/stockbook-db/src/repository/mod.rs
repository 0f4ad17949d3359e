//! # Repository Module
//!
//! Database repository implementations for Stockbook.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  InventoryService                                                      │
//! │       │                                                                 │
//! │       │  db.products().get_by_name("Widget")                           │
//! │       ▼                                                                 │
//! │  ProductRepository / HistoryRepository                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Two call styles:                                                       │
//! │  • &self methods run standalone reads on the pool                      │
//! │  • *_tx free functions take &mut SqliteConnection so the service       │
//! │    can compose them inside one atomic transaction                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Ledger row reads and tx-scoped mutations
//! - [`history::HistoryRepository`] - add_history / sell_history operations

pub mod history;
pub mod product;
