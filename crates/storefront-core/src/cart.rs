//! # Cart State Machine
//!
//! The single source of truth for the storefront: the loaded catalog, the
//! cart lines, and the catalog load status. Every state transition goes
//! through a method on [`Cart`]; every derived value is recomputed from the
//! current state on read.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  View Gesture            Operation                  Lines Change        │
//! │  ────────────            ─────────                  ────────────        │
//! │                                                                         │
//! │  "Add to cart" ────────► add_to_cart() ──┬────────► push(new line)     │
//! │                                          └────────► lines[i].qty += 1  │
//! │                                                                         │
//! │  Stepper +/- ──────────► change_quantity() ───────► qty ± 1 / remove   │
//! │                                                                         │
//! │  "Remove" ─────────────► mark_removing() ─────────► is_removing = true │
//! │         (after delay) ─► remove_line_by_id() ─────► remove(i)          │
//! │                                                                         │
//! │  Badge / totals ───────► cart_count(), cart_total() (read only)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product name
//! - Every quantity is ≥ 1
//! - Catalog status moves Loading → Ready or Loading → Failed, once
//! - Quantity changes never reorder lines; only removal does

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, CatalogStatus, Direction, LineId, Product};

// =============================================================================
// Operation Outcomes
// =============================================================================

/// What `add_to_cart` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added(LineId),
    /// An existing line's quantity was bumped.
    Incremented { id: LineId, quantity: u32 },
}

impl AddOutcome {
    pub fn line_id(&self) -> LineId {
        match self {
            AddOutcome::Added(id) => *id,
            AddOutcome::Incremented { id, .. } => *id,
        }
    }
}

/// What `change_quantity` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line is still present with this quantity.
    Changed { id: LineId, quantity: u32 },
    /// A decrease from 1 removed the line.
    Removed(CartLine),
}

// =============================================================================
// Cart
// =============================================================================

/// Catalog, cart lines and catalog status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    catalog: Vec<Product>,
    lines: Vec<CartLine>,
    catalog_status: CatalogStatus,
    last_catalog_error: Option<String>,
}

impl Cart {
    /// Creates the initial state: empty catalog, empty cart, `Loading`.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Catalog Lifecycle
    // =========================================================================

    /// Installs the catalog and moves the status to `Ready`.
    ///
    /// Rejected once the status is terminal.
    pub fn load_catalog(&mut self, products: Vec<Product>) -> CoreResult<()> {
        self.ensure_catalog_pending()?;
        self.catalog = products;
        self.catalog_status = CatalogStatus::Ready;
        Ok(())
    }

    /// Records a catalog failure and moves the status to `Failed`.
    ///
    /// Catalog and lines are left untouched.
    pub fn report_catalog_error(&mut self, error: impl Into<String>) -> CoreResult<()> {
        self.ensure_catalog_pending()?;
        self.last_catalog_error = Some(error.into());
        self.catalog_status = CatalogStatus::Failed;
        Ok(())
    }

    fn ensure_catalog_pending(&self) -> CoreResult<()> {
        if self.catalog_status.is_terminal() {
            return Err(CoreError::CatalogAlreadySettled {
                status: self.catalog_status,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Line Mutations
    // =========================================================================

    /// Appends a quantity-1 line for `product`.
    ///
    /// ## Errors
    /// `DuplicateLine` if the product already has a line. Use
    /// [`Cart::add_to_cart`] unless the caller has already checked.
    pub fn add_new_line(&mut self, product: &Product) -> CoreResult<LineId> {
        if self.find_line(&product.name).is_some() {
            return Err(CoreError::DuplicateLine(product.name.clone()));
        }

        let line = CartLine::from_product(product);
        let id = line.id;
        self.lines.push(line);
        Ok(id)
    }

    /// Increments the quantity of the line for `product_name` by one and
    /// returns the new quantity.
    pub fn increment_existing_line(&mut self, product_name: &str) -> CoreResult<(LineId, u32)> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.name == product_name)
            .ok_or_else(|| CoreError::LineNotFound(product_name.to_string()))?;

        line.quantity += 1;
        Ok((line.id, line.quantity))
    }

    /// Adds one unit of `product`: a new line if absent, otherwise the
    /// existing line's quantity goes up by one.
    pub fn add_to_cart(&mut self, product: &Product) -> CoreResult<AddOutcome> {
        if self.find_line(&product.name).is_some() {
            let (id, quantity) = self.increment_existing_line(&product.name)?;
            Ok(AddOutcome::Incremented { id, quantity })
        } else {
            self.add_new_line(product).map(AddOutcome::Added)
        }
    }

    /// Steps the quantity of the line at `index`.
    ///
    /// A decrease from 1 removes the line; every later line shifts down one
    /// position.
    pub fn change_quantity(&mut self, index: usize, direction: Direction) -> CoreResult<QuantityChange> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;

        match direction {
            Direction::Increase => {
                line.quantity += 1;
            }
            Direction::Decrease if line.quantity == 1 => {
                return Ok(QuantityChange::Removed(self.lines.remove(index)));
            }
            Direction::Decrease => {
                line.quantity -= 1;
            }
        }

        Ok(QuantityChange::Changed {
            id: line.id,
            quantity: line.quantity,
        })
    }

    /// Removes the line at `index` regardless of its quantity.
    pub fn remove_line_immediate(&mut self, index: usize) -> CoreResult<CartLine> {
        self.check_index(index)?;
        Ok(self.lines.remove(index))
    }

    /// Removes the line with `id`, wherever it currently sits. Returns the
    /// position it was removed from.
    pub fn remove_line_by_id(&mut self, id: LineId) -> CoreResult<(usize, CartLine)> {
        let index = self.index_of(id).ok_or(CoreError::UnknownLine(id))?;
        Ok((index, self.lines.remove(index)))
    }

    /// Flags the line at `index` as pending removal and returns its id.
    pub fn mark_removing(&mut self, index: usize) -> CoreResult<LineId> {
        self.check_index(index)?;
        let line = &mut self.lines[index];
        line.is_removing = true;
        Ok(line.id)
    }

    /// Clears the pending-removal flag on the line with `id`.
    pub fn clear_removing(&mut self, id: LineId) -> CoreResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(CoreError::UnknownLine(id))?;
        line.is_removing = false;
        Ok(())
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.lines.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // State Accessors
    // =========================================================================

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn catalog_status(&self) -> CatalogStatus {
        self.catalog_status
    }

    /// The message recorded by the last `report_catalog_error`, if any.
    pub fn last_catalog_error(&self) -> Option<&str> {
        self.last_catalog_error.as_deref()
    }

    pub fn line(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (not units).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Position of the line for `product_name`.
    pub fn find_line(&self, product_name: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.name == product_name)
    }

    /// Current position of the line with `id`.
    pub fn index_of(&self, id: LineId) -> Option<usize> {
        self.lines.iter().position(|l| l.id == id)
    }

    // =========================================================================
    // Derived Queries
    // =========================================================================

    /// Total units across all lines.
    pub fn cart_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `unit_price × quantity` over all lines.
    pub fn cart_total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn line_quantity(&self, index: usize) -> Option<u32> {
        self.lines.get(index).map(|l| l.quantity)
    }

    pub fn line_total(&self, index: usize) -> Option<Money> {
        self.lines.get(index).map(CartLine::line_total)
    }

    /// Quantity in cart for a product, if it has a line.
    pub fn quantity_of(&self, product_name: &str) -> Option<u32> {
        self.find_line(product_name).and_then(|i| self.line_quantity(i))
    }

    /// Distinct lower-cased category labels in the catalog.
    pub fn category_names(&self) -> BTreeSet<String> {
        catalog::category_names(&self.catalog)
    }

    pub fn products_in_category(&self, category: &str) -> Vec<&Product> {
        catalog::products_in_category(&self.catalog, category)
    }

    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        catalog::product_by_slug(&self.catalog, slug)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
