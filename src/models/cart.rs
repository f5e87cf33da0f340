use serde::{Deserialize, Serialize};

use crate::models::line_item::LineItem;

/// Fixed sales tax applied to the subtotal.
pub const TAX_RATE: f64 = 0.10;

/// Shipping is free for every order.
pub const SHIPPING_COST: f64 = 0.0;

/// Ordered collection of line items, at most one entry per id.
///
/// Every entry has `quantity >= 1`. All mutations return a new cart and
/// leave `self` untouched, so callers decide when the new state is published.
/// Deserialized carts go through [`Cart::from_items`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CartItems")]
pub struct Cart {
    items: Vec<LineItem>,
}

#[derive(Deserialize)]
struct CartItems {
    items: Vec<LineItem>,
}

impl From<CartItems> for Cart {
    fn from(raw: CartItems) -> Self {
        Cart::from_items(raw.items)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
}

/// Cart state as handed to subscribers: the items plus totals derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two demo entries the cart screen starts with.
    pub fn demo() -> Self {
        Self::from_items(vec![
            LineItem::new(
                "1",
                "Wireless Headphones",
                299.99,
                1,
                "https://picsum.photos/200/200?random=1",
            ),
            LineItem::new(
                "2",
                "Smart Watch",
                199.99,
                2,
                "https://picsum.photos/200/200?random=2",
            ),
        ])
    }

    /// Build a cart from arbitrary items. Duplicate ids are merged into the
    /// first occurrence and entries that could not live in a cart are dropped.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        items
            .into_iter()
            .fold(Self::new(), |cart, item| cart.add_product(item))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn quantity_of(&self, id: &str) -> Option<i64> {
        self.get(id).map(|item| item.quantity)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all entries, capped at `i64::MAX`.
    pub fn unit_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity))
    }

    /// Set the quantity of `id`. A quantity of zero or less removes the
    /// entry, an unknown id leaves the cart as it is.
    pub fn set_quantity(&self, id: &str, new_quantity: i64) -> Cart {
        if new_quantity <= 0 {
            return self.remove_item(id);
        }

        Cart {
            items: self
                .items
                .iter()
                .map(|item| {
                    if item.id == id {
                        item.with_quantity(new_quantity)
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        }
    }

    pub fn remove_item(&self, id: &str) -> Cart {
        Cart {
            items: self
                .items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Put `item` in the cart. An existing entry with the same id grows by
    /// the incoming quantity, otherwise the item is appended. Items with a
    /// non-positive quantity or an unusable price are ignored.
    pub fn add_product(&self, item: LineItem) -> Cart {
        if item.quantity <= 0 || !item.has_valid_price() {
            return self.clone();
        }

        match self.quantity_of(&item.id) {
            Some(current) => self.set_quantity(&item.id, current.saturating_add(item.quantity)),
            None => {
                let mut items = self.items.clone();
                items.push(item);
                Cart { items }
            }
        }
    }

    pub fn totals(&self) -> CartTotals {
        compute_totals(self)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            totals: self.totals(),
        }
    }
}

/// Derive subtotal, tax and total from the current entries.
pub fn compute_totals(cart: &Cart) -> CartTotals {
    let subtotal: f64 = cart.items.iter().map(LineItem::line_total).sum();
    let tax = subtotal * TAX_RATE;
    let shipping = SHIPPING_COST;

    CartTotals {
        subtotal,
        tax,
        shipping,
        total: subtotal + tax + shipping,
    }
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        cart.snapshot()
    }
}
