use khmer_shopcart::models::{compute_totals, Cart, CartTotals, LineItem};

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn catalog_cart() -> Cart {
    Cart::from_items(vec![
        LineItem::new("1", "Wireless Headphones", 299.99, 1, "https://picsum.photos/200/200?random=1"),
        LineItem::new("2", "Smart Watch", 199.99, 2, "https://picsum.photos/200/200?random=2"),
        LineItem::new("rec_4", "Rec Product 4", 19.99, 4, "https://picsum.photos/200/200?random=13"),
    ])
}

#[test]
fn test_demo_cart_totals() {
    let totals = compute_totals(&Cart::demo());
    assert_close(totals.subtotal, 699.97);
    assert_close(totals.tax, 69.997);
    assert_close(totals.total, 769.967);
    assert_eq!(totals.shipping, 0.0);
}

#[test]
fn test_empty_cart_totals() {
    assert_eq!(compute_totals(&Cart::new()), CartTotals::default());
    let emptied = Cart::demo().remove_item("1").remove_item("2");
    assert_eq!(compute_totals(&emptied), CartTotals::default());
}

#[test]
fn test_zero_quantity_removes_and_keeps_order() {
    let cart = catalog_cart();
    let updated = cart.set_quantity("1", 0);

    let ids: Vec<&str> = updated.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "rec_4"]);
    assert_eq!(&updated.items()[..], &cart.items()[1..]);
}

#[test]
fn test_unknown_id_leaves_cart_identical() {
    let cart = catalog_cart();
    assert_eq!(cart.set_quantity("999", 5), cart);
}

#[test]
fn test_remove_is_idempotent() {
    let cart = catalog_cart();
    let once = cart.remove_item("rec_4");
    assert_eq!(once.remove_item("rec_4"), once);
}

#[test]
fn test_quantity_invariant_over_long_sequence() {
    let mut cart = catalog_cart();
    let ids = ["1", "2", "rec_4", "missing"];

    // Deterministic walk over increments, decrements and removals.
    for step in 0..200i64 {
        let id = ids[(step % 4) as usize];
        let delta = (step * 7 % 5) - 2;
        cart = match step % 6 {
            5 => cart.remove_item(id),
            _ => {
                let current = cart.quantity_of(id).unwrap_or(0);
                cart.set_quantity(id, current + delta)
            }
        };
        assert!(
            cart.items().iter().all(|item| item.quantity >= 1),
            "non-positive quantity after step {}",
            step
        );
        let totals = compute_totals(&cart);
        assert!(totals.subtotal >= 0.0);
        assert_close(totals.total, totals.subtotal + totals.tax);
    }
}

#[test]
fn test_totals_are_recomputed_after_each_mutation() {
    let cart = catalog_cart();
    assert_close(cart.totals().subtotal, 699.97 + 4.0 * 19.99);

    let cart = cart.set_quantity("rec_4", 1);
    assert_close(cart.totals().subtotal, 699.97 + 19.99);

    let cart = cart.add_product(LineItem::new("rec_4", "Rec Product 4", 19.99, 2, ""));
    assert_eq!(cart.quantity_of("rec_4"), Some(3));
    assert_close(cart.totals().tax, (699.97 + 3.0 * 19.99) * 0.10);
}
