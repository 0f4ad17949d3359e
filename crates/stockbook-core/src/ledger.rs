//! # Ledger Rules
//!
//! The apply/reverse arithmetic that keeps a product's running totals
//! consistent with its append-only history.
//!
//! ## How The Ledger Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Ledger Mutation Protocol                            │
//! │                                                                         │
//! │  add stock          apply_add()      ──► totals up, stock recomputed   │
//! │  sell stock         apply_sell()     ──► stock checked, totals up      │
//! │  delete add row     reverse_add()    ──► totals down, stock recomputed │
//! │  delete sell row    reverse_sell()   ──► totals down, stock recomputed │
//! │                                                                         │
//! │  Invariant after every call:                                           │
//! │    available_stock == total_added_qty - total_sold_qty                 │
//! │                                                                         │
//! │  The store layer wraps each of these in one transaction together       │
//! │  with the matching history insert/delete - neither is visible alone.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Incremental Totals?
//! Reads are O(1): summaries return the stored totals verbatim instead of
//! folding over history. The price is that out-of-band history edits must go
//! through the reverse functions here, never around them.
//!
//! ## Reversal Edge Case
//! Reversing a sell restores stock to what it would have been without the
//! sale. Reversing an add can drive `available_stock` *negative* when later
//! sells already consumed the un-added units. That state is accepted and
//! flagged by the store layer, not rejected - refusing would make deletion
//! success depend on unrelated later events.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

impl Product {
    /// Applies a stock addition to the running totals.
    ///
    /// The caller validates `qty > 0` and `unit_price >= 0` first
    /// (see [`crate::validation`]); this function assumes clean input.
    pub fn apply_add(&mut self, qty: i64, unit_price: Money) {
        self.total_added_qty += qty;
        self.total_added_cents += unit_price.multiply_quantity(qty).cents();
        self.recompute_available_stock();
    }

    /// Applies a sale to the running totals.
    ///
    /// ## Returns
    /// `CoreError::InsufficientStock` when `qty` exceeds `available_stock`;
    /// the product is left untouched in that case.
    pub fn apply_sell(&mut self, qty: i64, unit_price: Money) -> CoreResult<()> {
        if qty > self.available_stock {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.available_stock,
                requested: qty,
            });
        }

        self.total_sold_qty += qty;
        self.total_sold_cents += unit_price.multiply_quantity(qty).cents();
        self.recompute_available_stock();
        Ok(())
    }

    /// Reverses an add-history record's contribution to the totals.
    ///
    /// Does not touch the history store - the caller deletes the row in the
    /// same transaction. May leave `available_stock` negative (see module
    /// docs); the caller decides how loudly to flag that.
    pub fn reverse_add(&mut self, qty: i64, total_amount: Money) {
        self.total_added_qty -= qty;
        self.total_added_cents -= total_amount.cents();
        self.recompute_available_stock();
    }

    /// Reverses a sell-history record's contribution to the totals.
    ///
    /// Stock is definitionally restored to what it would have been had the
    /// sale never happened; no re-validation is performed.
    pub fn reverse_sell(&mut self, qty: i64, total_amount: Money) {
        self.total_sold_qty -= qty;
        self.total_sold_cents -= total_amount.cents();
        self.recompute_available_stock();
    }

    /// Re-derives `available_stock` from the quantity totals.
    #[inline]
    fn recompute_available_stock(&mut self) {
        self.available_stock = self.total_added_qty - self.total_sold_qty;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
