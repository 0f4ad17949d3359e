//! # Validation Module
//!
//! Input validation for Stockbook operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Transport (outside this workspace)                           │
//! │  └── Schema / type checks, immediate caller feedback                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before any mutation)                            │
//! │  ├── quantity > 0, unit price >= 0                                     │
//! │  └── product name present, date canonical                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── Foreign key constraints (no orphan history rows)                  │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A validation failure is a fault (4xx-equivalent), distinct from business
//! outcomes like insufficient stock.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{DATE_FORMAT, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// Lookup stays case-sensitive and exact; no normalization beyond the trim.
///
/// ## Example
/// ```rust
/// use stockbook_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name(" Widget ").unwrap(), "Widget");
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product_name".to_string(),
        });
    }

    if name.len() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "product_name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a transaction date string.
///
/// ## Rules
/// - Must parse as a real calendar date in canonical `YYYY-MM-DD` form
///
/// ## Why Parse At All?
/// Range queries compare dates lexicographically and never parse them, so
/// the only safe moment to enforce the canonical sortable form is here,
/// when the string first enters the store.
pub fn validate_date(date: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    };

    // chrono accepts non-padded months/days; the store needs the fixed-width
    // form or lexicographic ordering breaks
    if date.len() != 10 {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a transaction quantity.
///
/// ## Rules
/// - Must be strictly positive (> 0)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Add / Sell Stock                                                       │
/// │                                                                         │
/// │  Caller supplies quantity: 10                                          │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(10) ← THIS FUNCTION                                 │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       └── OK → Proceed to the ledger                                   │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (donated / promotional stock)
///
/// ## Example
/// ```rust
/// use stockbook_core::validation::validate_unit_price_cents;
///
/// assert!(validate_unit_price_cents(250).is_ok()); // $2.50
/// assert!(validate_unit_price_cents(0).is_ok());   // Free stock
/// assert!(validate_unit_price_cents(-1).is_err());
/// ```
pub fn validate_unit_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
