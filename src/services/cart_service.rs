use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    cart::{Cart, CartSnapshot, CartTotals},
    event::{CartEvent, CartOutcome},
};

/// Owns the cart for one shopping session.
///
/// Every event is applied through the pure ledger operations on [`Cart`]
/// and the resulting state is pushed to subscribers, whether or not the
/// event changed anything. Applying an event never fails: unknown ids and
/// non-positive quantities follow the ledger's permissive policy.
pub struct CartController {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    cart: Cart,
    state_tx: watch::Sender<CartSnapshot>,
}

impl CartController {
    pub fn new(cart: Cart) -> Self {
        let (state_tx, _) = watch::channel(cart.snapshot());
        let session_id = Uuid::new_v4();
        info!(
            "Cart session {} started with {} items",
            session_id,
            cart.len()
        );

        Self {
            session_id,
            started_at: Utc::now(),
            cart,
            state_tx,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Receiver that sees the state published after every event.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.state_tx.subscribe()
    }

    pub fn apply(&mut self, event: CartEvent) -> CartOutcome {
        debug!("Session {} applying {:?}", self.session_id, event);

        let next = match event {
            CartEvent::Increment(id) => match self.cart.quantity_of(&id) {
                Some(quantity) => self.cart.set_quantity(&id, quantity.saturating_add(1)),
                None => {
                    debug!("Increment ignored, {} is not in the cart", id);
                    self.cart.clone()
                }
            },
            CartEvent::Decrement(id) => match self.cart.quantity_of(&id) {
                Some(quantity) => {
                    if quantity <= 1 {
                        info!("Item {} removed from cart after decrement", id);
                    }
                    self.cart.set_quantity(&id, quantity - 1)
                }
                None => {
                    debug!("Decrement ignored, {} is not in the cart", id);
                    self.cart.clone()
                }
            },
            CartEvent::Remove(id) => self.cart.remove_item(&id),
            CartEvent::SetQuantity(id, quantity) => {
                if quantity <= 0 && self.cart.contains(&id) {
                    info!("Item {} removed from cart, quantity set to {}", id, quantity);
                }
                self.cart.set_quantity(&id, quantity)
            }
            CartEvent::AddProduct(item) => {
                info!("Adding {} x{} to cart", item.id, item.quantity);
                self.cart.add_product(item)
            }
            CartEvent::Checkout => {
                info!(
                    "Checkout requested for session {} ({} items)",
                    self.session_id,
                    self.cart.len()
                );
                return CartOutcome::NavigateToCheckout;
            }
        };

        let changed = next != self.cart;
        self.cart = next;
        self.publish();

        if changed {
            CartOutcome::Changed
        } else {
            CartOutcome::Unchanged
        }
    }

    /// Empty the cart at the end of a session.
    pub fn reset(&mut self) {
        info!("Cart session {} reset", self.session_id);
        self.cart = Cart::new();
        self.publish();
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.cart.snapshot());
    }
}

impl Default for CartController {
    fn default() -> Self {
        Self::new(Cart::new())
    }
}
