//! End-to-end scenarios against a real tokio-backed broadcaster.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use herald::{
    AsyncBroadcaster, Broadcaster, BroadcasterKey, Event, EventPattern, HarnessError, Hub,
    Listener, ListenerId, OverrideController,
};

#[derive(Default)]
struct Counter(AtomicUsize);

impl Listener for Counter {
    fn on_event(&self, _event: &Event) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &'static str {
        "counter"
    }
}

struct Scenario {
    hub: Hub,
    production: Arc<dyn Broadcaster>,
    counter: Arc<Counter>,
}

/// `{default: AsyncBroadcaster}` plus `{counter, on: "created", AsyncBroadcaster}`.
fn scenario() -> Scenario {
    let hub = Hub::new();
    let production: Arc<dyn Broadcaster> =
        Arc::new(AsyncBroadcaster::current().expect("inside a tokio runtime"));
    hub.registry()
        .set(BroadcasterKey::DEFAULT, Arc::clone(&production));

    let counter = Arc::new(Counter::default());
    let listener: Arc<dyn Listener> = counter.clone();
    hub.listeners().subscribe(
        listener,
        EventPattern::on("created"),
        Arc::clone(&production),
    );

    Scenario {
        hub,
        production,
        counter,
    }
}

fn publish(hub: &Hub, name: &str) {
    let ev = Event::new(name.to_string());
    for reg in hub.listeners().registrations() {
        reg.broadcaster().deliver(&ev, reg.listener());
    }
}

#[tokio::test]
async fn fake_then_restore_swaps_async_broadcasters_back() {
    let s = scenario();
    let ctl = OverrideController::for_hub(&s.hub);

    ctl.fake().unwrap();
    let default = s.hub.registry().get(&BroadcasterKey::DEFAULT).unwrap();
    assert_eq!(default.name(), "FakeBroadcaster");
    assert_eq!(
        s.hub.listeners().registrations()[0].broadcaster().name(),
        "FakeBroadcaster"
    );
    assert!(ctl.is_enabled());

    ctl.restore().unwrap();
    let default = s.hub.registry().get(&BroadcasterKey::DEFAULT).unwrap();
    assert!(Arc::ptr_eq(&default, &s.production));
    assert!(Arc::ptr_eq(
        &s.hub.listeners().registrations()[0].broadcaster(),
        &s.production
    ));
    assert!(!ctl.is_enabled());
}

#[tokio::test]
async fn production_delivery_is_deferred() {
    let s = scenario();

    publish(&s.hub, "created");
    // Spawned on the current-thread runtime: not run until we yield.
    assert_eq!(s.counter.0.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(s.counter.0.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn inline_override_makes_delivery_immediate() {
    let s = scenario();
    let ctl = OverrideController::for_hub(&s.hub);

    ctl.with_inline(|| {
        publish(&s.hub, "created");
        assert_eq!(s.counter.0.load(Ordering::SeqCst), 1);
    })
    .unwrap();
}

#[tokio::test]
async fn fake_override_drops_delivery() {
    let s = scenario();
    let ctl = OverrideController::for_hub(&s.hub);

    ctl.with_fake(|| publish(&s.hub, "created")).unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert_eq!(s.counter.0.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn orphaned_registration_is_reported_by_scope() {
    let s = scenario();
    let ctl = OverrideController::for_hub(&s.hub);
    let late: Arc<dyn Listener> = Arc::new(Counter::default());
    let late_id = ListenerId::of(&late);

    let err = ctl
        .with_fake(|| {
            s.hub.listeners().subscribe(
                Arc::clone(&late),
                EventPattern::on("deleted"),
                Arc::clone(&s.production),
            );
        })
        .unwrap_err();

    match &err {
        HarnessError::UnmappedRegistration {
            listener,
            listener_id,
            pattern,
        } => {
            assert_eq!(*listener, "counter");
            assert_eq!(*listener_id, late_id);
            assert_eq!(*pattern, EventPattern::on("deleted"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("'counter'"));
    assert!(ctl.is_enabled());

    s.hub.listeners().unsubscribe(late_id);
    ctl.restore().unwrap();
    assert!(!ctl.is_enabled());
}

#[tokio::test]
async fn async_scope_with_multi_listener_recording() {
    let s = scenario();
    let order = Arc::new(Mutex::new(Vec::new()));

    struct Ordered(&'static str, Arc<Mutex<Vec<&'static str>>>);
    impl Listener for Ordered {
        fn on_event(&self, _event: &Event) {
            self.1.lock().unwrap().push(self.0);
        }
    }

    for tag in ["first", "second", "third"] {
        let l: Arc<dyn Listener> = Arc::new(Ordered(tag, Arc::clone(&order)));
        s.hub
            .listeners()
            .subscribe(l, EventPattern::Any, Arc::clone(&s.production));
    }

    let ctl = OverrideController::for_hub(&s.hub);
    ctl.with_inline_async(async {
        tokio::task::yield_now().await;
        publish(&s.hub, "created");
    })
    .await
    .unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    assert_eq!(s.counter.0.load(Ordering::SeqCst), 1);
}
