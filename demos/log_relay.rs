//! Log relay demo.
//!
//! Wires a console sink and an error counter onto one transport, adds a
//! host-defined `AUDIT` action, and shows a one-shot listener in action.
//!
//! Run with `RUST_LOG=listener_transport=debug cargo run --example log_relay`
//! to see the transport's own bookkeeping.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use listener_transport::{Action, Event, Listener, OncePolicy, Result, Transport, TransportBuilder};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_ansi(false)
        .init();

    let transport: Transport<Value> = TransportBuilder::new()
        .action("AUDIT")
        .once_policy(OncePolicy::RemoveSelf)
        .build()?;

    let console = Listener::new(|event: &Event<Value>| {
        println!("[{}] {}", event.action, event.data);
    });
    transport.add_listener(Action::LOG, console.clone());
    transport.add_listener(Action::ERROR, console.clone());
    transport.add_listener("AUDIT", console.clone());

    let errors = Arc::new(AtomicUsize::new(0));
    let counter = errors.clone();
    transport.add_listener(
        Action::ERROR,
        Listener::new(move |_: &Event<Value>| {
            counter.fetch_add(1, Ordering::Relaxed);
        }),
    );

    transport.once(
        "AUDIT",
        Listener::new(|event: &Event<Value>| {
            println!("first audit record: {}", event.data["user"]);
        }),
    );

    transport.emit(Action::LOG, json!("service starting"));
    transport.emit("AUDIT", json!({ "user": "alice", "op": "login" }));
    transport.emit("AUDIT", json!({ "user": "bob", "op": "login" }));
    transport.emit(Action::ERROR, json!({ "code": 503, "msg": "upstream unavailable" }));

    transport.remove_listener(Action::LOG, &console);
    transport.emit(Action::LOG, json!("not printed"));

    // Not configured up front; the first registration adds it.
    transport.add_listener("METRIC", console);
    transport.emit("METRIC", json!({ "requests": 42 }));
    println!("actions: {:?}", transport.actions().iter().collect::<Vec<_>>());

    println!("errors seen: {}", errors.load(Ordering::Relaxed));
    Ok(())
}
