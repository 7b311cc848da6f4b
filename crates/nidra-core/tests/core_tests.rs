//! Integration tests for nidra-core: message model, token estimation, event bus, config loading.

use nidra_core::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct ToyConfig {
    #[serde(default = "default_interval")]
    interval_ms: u64,
}

fn default_interval() -> u64 {
    5000
}

impl Default for ToyConfig {
    fn default() -> Self {
        Self { interval_ms: default_interval() }
    }
}

#[test]
fn message_as_text_joins_text_parts() {
    let msg = Message::new("m1", Role::User, 0)
        .with_text("hello")
        .with_text("world");
    assert_eq!(msg.as_text(), "hello world");
}

#[test]
fn message_as_text_skips_images() {
    let mut msg = Message::new("m1", Role::User, 0).with_text("caption");
    msg.content.push(ContentPart::Image { media_type: "image/png".into(), data: "xyz".into() });
    assert_eq!(msg.as_text(), "caption");
}

#[test]
fn chars_per_token_estimator_scales_with_length() {
    let est = CharsPerTokenEstimator::new(1000);
    let short = Message::new("a", Role::User, 0).with_text("hi");
    let long = Message::new("b", Role::User, 0).with_text(&"x".repeat(400));
    assert!(est.estimate(&long) > est.estimate(&short));
    assert_eq!(est.context_limit(), 1000);
}

#[test]
fn empty_message_has_minimal_nonzero_estimate() {
    let est = CharsPerTokenEstimator::new(1000);
    let empty = Message::new("a", Role::System, 0);
    assert_eq!(est.estimate(&empty), 4);
}

#[test]
fn event_bus_delivers_to_late_subscribers_only_after_subscribe() {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    let bus: EventBus<&'static str> = EventBus::new();
    bus.emit(&"before"); // no subscribers yet, must not panic
    let count = Arc::new(AtomicU32::new(0));
    let c2 = count.clone();
    bus.subscribe(move |_| {
        c2.fetch_add(1, Ordering::SeqCst);
    });
    bus.emit(&"after");
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn load_toml_or_default_reads_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "interval_ms = 9000\n").unwrap();

    let loaded: ToyConfig = load_toml_or_default(&path);
    assert_eq!(loaded.interval_ms, 9000);
}

#[test]
fn load_toml_or_default_falls_back_when_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let loaded: ToyConfig = load_toml_or_default(&path);
    assert_eq!(loaded, ToyConfig::default());
}

#[test]
fn load_toml_or_default_falls_back_on_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "not valid toml {{{").unwrap();

    let loaded: ToyConfig = load_toml_or_default(&path);
    assert_eq!(loaded, ToyConfig::default());
}
