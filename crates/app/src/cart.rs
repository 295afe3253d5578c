//! Shopping cart.
//!
//! Client-only state: nothing here is persisted remotely until the cart is
//! turned into an order. Each line snapshots the product at add time, so a
//! later catalog reload does not reprice lines already in the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductId};

/// One product in the cart with its chosen quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product at add time.
    pub product: Product,
    /// Never below 1; decrements clamp rather than remove.
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal: price × quantity.
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The cart: an ordered set of lines keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines in add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a product with quantity 1. Adding a product already in the
    /// cart leaves its existing line untouched.
    pub fn add(&mut self, product: Product) {
        if self.line(product.id).is_some() {
            return;
        }
        self.lines.push(CartLine {
            product,
            quantity: 1,
        });
    }

    /// Look up the line for a product.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }

    /// Increase a line's quantity by one.
    pub fn increment(&mut self, id: ProductId) {
        if let Some(line) = self.line_mut(id) {
            line.quantity += 1;
        }
    }

    /// Decrease a line's quantity by one, clamped at 1.
    pub fn decrement(&mut self, id: ProductId) {
        if let Some(line) = self.line_mut(id) {
            line.quantity = line.quantity.saturating_sub(1).max(1);
        }
    }

    /// Set a line's quantity directly, clamped at 1.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity.max(1);
        }
    }

    /// Drop a line entirely.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.product.id != id);
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total price across all lines.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}
