use serde::{Deserialize, Serialize};

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub title: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub image_ref: String,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        unit_price: f64,
        quantity: i64,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            unit_price,
            quantity,
            image_ref: image_ref.into(),
        }
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }

    pub fn with_quantity(&self, quantity: i64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    /// A price that can sit in a cart: finite and not negative.
    pub fn has_valid_price(&self) -> bool {
        self.unit_price.is_finite() && self.unit_price >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = LineItem::new("2", "Smart Watch", 199.99, 2, "img");
        assert!((item.line_total() - 399.98).abs() < 1e-9);
    }

    #[test]
    fn test_with_quantity_keeps_other_fields() {
        let item = LineItem::new("2", "Smart Watch", 199.99, 2, "img");
        let bumped = item.with_quantity(5);
        assert_eq!(bumped.quantity, 5);
        assert_eq!(bumped.id, item.id);
        assert_eq!(bumped.title, item.title);
        assert_eq!(bumped.image_ref, item.image_ref);
    }

    #[test]
    fn test_has_valid_price() {
        assert!(LineItem::new("a", "A", 0.0, 1, "").has_valid_price());
        assert!(!LineItem::new("a", "A", -1.0, 1, "").has_valid_price());
        assert!(!LineItem::new("a", "A", f64::NAN, 1, "").has_valid_price());
    }
}
