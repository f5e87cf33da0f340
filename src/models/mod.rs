pub mod cart;
pub mod event;
pub mod line_item;
pub mod product;

pub use cart::{compute_totals, Cart, CartSnapshot, CartTotals, SHIPPING_COST, TAX_RATE};
pub use event::{CartEvent, CartOutcome, CartScript, EventParseError, ScriptedEvent};
pub use line_item::LineItem;
pub use product::{Category, Product, ProductError, StoreProductRequest};
