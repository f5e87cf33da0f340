use std::io::Write;

use khmer_shopcart::cli::commands::{export_snapshot, load_script};
use clap::Parser;
use khmer_shopcart::cli::{Args, CliApp};
use khmer_shopcart::models::{CartOutcome, CartSnapshot, ScriptedEvent};
use khmer_shopcart::utils::Config;
use tempfile::NamedTempFile;

fn app() -> CliApp {
    CliApp::new(Config::default()).expect("Failed to build app")
}

fn write_script(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_replay_script_against_demo_cart() {
    let file = write_script(
        r#"{
            "description": "bump headphones, drop the watch, add a recommendation",
            "events": [
                {"type": "increment", "id": "1"},
                {"type": "set", "id": "2", "quantity": 0},
                {"type": "add", "product_id": "rec_2"},
                {"type": "decrement", "id": "999"},
                {"type": "checkout"}
            ]
        }"#,
    );

    let app = app();
    let script = load_script(file.path()).unwrap();
    let mut controller = app.new_controller(false);
    let outcomes = app.apply_events(&mut controller, script.events).await.unwrap();

    assert_eq!(
        outcomes,
        vec![
            CartOutcome::Changed,
            CartOutcome::Changed,
            CartOutcome::Changed,
            CartOutcome::Unchanged,
            CartOutcome::NavigateToCheckout,
        ]
    );

    let cart = controller.cart();
    assert_eq!(cart.quantity_of("1"), Some(2));
    assert!(!cart.contains("2"));
    assert_eq!(cart.quantity_of("rec_2"), Some(1));
    assert!((controller.totals().subtotal - (2.0 * 299.99 + 29.99)).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_product_fails_the_script() {
    let app = app();
    let mut controller = app.new_controller(true);
    let events = vec!["add:prod_0".parse().unwrap(), "add:nope".parse().unwrap()];

    let result = app.apply_events(&mut controller, events).await;
    assert!(result.is_err());
    // Events before the failing one were applied.
    assert_eq!(controller.cart().quantity_of("prod_0"), Some(1));
}

#[tokio::test]
async fn test_seeding_can_be_disabled() {
    let config = Config {
        seed_demo_cart: false,
        ..Config::default()
    };
    let app = CliApp::new(config).unwrap();
    assert!(app.new_controller(false).cart().is_empty());
}

#[test]
fn test_invalid_script_is_reported() {
    let file = write_script(r#"{"events": [{"type": "teleport"}]}"#);
    let err = load_script(file.path()).unwrap_err();
    assert!(err.to_string().contains("Invalid event script"));
}

#[test]
fn test_export_writes_snapshot_json() {
    let app = app();
    let snapshot = app.new_controller(false).snapshot();
    let file = NamedTempFile::new().unwrap();

    export_snapshot(&snapshot, Some(file.path())).unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    let restored: CartSnapshot = serde_json::from_str(&content).unwrap();
    assert_eq!(restored.items.len(), 2);
    assert!((restored.totals.total - 769.967).abs() < 1e-9);
}

#[test]
fn test_event_tokens_match_script_events() {
    let token: ScriptedEvent = "set:2=3".parse().unwrap();
    let json: ScriptedEvent =
        serde_json::from_str(r#"{"type": "set", "id": "2", "quantity": 3}"#).unwrap();
    assert_eq!(token, json);
}

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|token| token.to_string()).collect()
}

#[tokio::test]
async fn test_apply_tokens_against_demo_cart() {
    let app = app();
    let mut controller = app.new_controller(false);
    let mut cart_rx = controller.subscribe();

    let outcomes = app
        .apply_tokens(&mut controller, &tokens(&["inc:1", "dec:2", "add:rec_1", "rm:999", "checkout"]))
        .await
        .unwrap();

    assert_eq!(
        outcomes,
        vec![
            CartOutcome::Changed,
            CartOutcome::Changed,
            CartOutcome::Changed,
            CartOutcome::Unchanged,
            CartOutcome::NavigateToCheckout,
        ]
    );
    let snapshot = cart_rx.borrow_and_update().clone();
    assert_eq!(snapshot, controller.snapshot());
    assert_eq!(controller.cart().quantity_of("1"), Some(2));
    assert_eq!(controller.cart().quantity_of("2"), Some(1));
    assert_eq!(controller.cart().quantity_of("rec_1"), Some(1));
}

#[tokio::test]
async fn test_bad_token_applies_nothing() {
    let app = app();
    let mut controller = app.new_controller(false);
    let before = controller.snapshot();

    let err = app
        .apply_tokens(&mut controller, &tokens(&["inc:1", "explode:2"]))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Invalid cart event"));
    assert_eq!(controller.snapshot(), before);
}

#[tokio::test]
async fn test_cart_apply_command_runs_end_to_end() {
    let app = app();

    let args = Args::try_parse_from(["khmer-shopcart", "cart", "apply", "set:2=5", "rm:1"]).unwrap();
    assert!(app.run(args).await.is_ok());

    let args = Args::try_parse_from(["khmer-shopcart", "cart", "apply", "--empty", "set:2"]).unwrap();
    let err = app.run(args).await.unwrap_err();
    assert!(err.to_string().contains("Invalid cart event"));
}
