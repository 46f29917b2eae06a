//! In-memory cart for a single session.
//!
//! Every operation is total: unknown product ids are ignored, quantities never
//! drop below one (a line that would reach zero is removed), and a product id
//! appears in at most one line.

use rust_decimal::Decimal;

use crate::models::{CartLine, Product};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, appending a new line if it is not in the cart yet.
    pub fn add_item(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Shifts the quantity of `product_id` by `delta`, removing the line at zero.
    pub fn update_quantity(&mut self, product_id: &str, delta: i32) {
        let Some(pos) = self.lines.iter().position(|l| l.product.id == product_id) else {
            return;
        };
        let next = (i64::from(self.lines[pos].quantity) + i64::from(delta)).max(0);
        if next == 0 {
            self.lines.remove(pos);
        } else {
            self.lines[pos].quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}
