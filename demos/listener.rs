//! # Fake vs inline delivery
//!
//! Registers a [`LogListener`] behind an async broadcaster, then publishes the
//! same event three ways:
//! - production delivery (spawned, logged after `deliver` returns)
//! - inside `with_fake` (dropped)
//! - inside `with_inline` (logged before `deliver` returns)
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example listener --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use herald::{
    AsyncBroadcaster, Broadcaster, BroadcasterKey, Event, EventPattern, Hub, Listener, LogListener,
    OverrideController,
};
use tracing_subscriber::EnvFilter;

fn publish(hub: &Hub, label: &str) {
    println!("── publish ({label})");
    let ev = Event::new("order_created").with_arg(label.to_string());
    for reg in hub.listeners().registrations() {
        reg.broadcaster().deliver(&ev, reg.listener());
    }
    println!("── returned ({label})");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let hub = Hub::new();
    let production: Arc<dyn Broadcaster> = Arc::new(AsyncBroadcaster::current()?);
    hub.registry()
        .set(BroadcasterKey::DEFAULT, Arc::clone(&production));

    let logger: Arc<dyn Listener> = Arc::new(LogListener::new());
    hub.listeners()
        .subscribe(logger, EventPattern::on("order_created"), production);

    let ctl = OverrideController::for_hub(&hub);

    publish(&hub, "async");
    tokio::time::sleep(Duration::from_millis(10)).await;

    ctl.with_fake(|| publish(&hub, "fake"))?;
    ctl.with_inline(|| publish(&hub, "inline"))?;

    println!(
        "restored: default={}",
        hub.registry()
            .get(&BroadcasterKey::DEFAULT)
            .map(|b| b.name())
            .unwrap_or("none")
    );
    Ok(())
}
