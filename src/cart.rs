//! Session-scoped shopping cart.

use crate::models::{CartItem, NewCartItem};
use crate::pricing::{line_total, parse_price};

/// Operations the storefront performs on a shopper's cart.
///
/// Handlers and the checkout flow only go through this trait so a
/// different store can be dropped in behind it.
pub trait CartStore {
    /// Insert with quantity 1, or bump an existing entry by 1.
    fn add_to_cart(&mut self, item: NewCartItem);

    /// Drop the entry for `product_id`. Absent ids are ignored.
    fn remove_from_cart(&mut self, product_id: i32);

    /// Set the quantity of an existing entry. Values below 1 are ignored.
    fn update_quantity(&mut self, product_id: i32, quantity: i64);

    fn items(&self) -> &[CartItem];

    /// Sum of quantities, not the number of entries.
    fn item_count(&self) -> u64;

    fn total_price(&self) -> f64;

    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// In-memory cart; entries keep insertion order for display.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, product_id: i32) -> Option<usize> {
        self.items.iter().position(|item| item.id == product_id)
    }
}

impl CartStore for Cart {
    fn add_to_cart(&mut self, item: NewCartItem) {
        match self.position(item.id) {
            Some(idx) => {
                let entry = &mut self.items[idx];
                entry.quantity = entry.quantity.saturating_add(1);
            }
            None => self.items.push(CartItem {
                id: item.id,
                name: item.name,
                price: item.price,
                image: item.image,
                quantity: 1,
            }),
        }
    }

    fn remove_from_cart(&mut self, product_id: i32) {
        self.items.retain(|item| item.id != product_id);
    }

    fn update_quantity(&mut self, product_id: i32, quantity: i64) {
        if quantity < 1 {
            return;
        }
        let Ok(quantity) = u32::try_from(quantity) else {
            return;
        };
        if let Some(idx) = self.position(product_id) {
            self.items[idx].quantity = quantity;
        }
    }

    fn items(&self) -> &[CartItem] {
        &self.items
    }

    fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    fn total_price(&self) -> f64 {
        self.items
            .iter()
            .map(|item| line_total(&item.price, item.quantity))
            .sum()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

/// Unit price of a cart entry, as used for order line snapshots.
pub fn unit_price(item: &CartItem) -> f64 {
    parse_price(&item.price)
}
