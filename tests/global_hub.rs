//! The process-wide hub and controller. Kept in its own test binary so no
//! other test shares the global state.

use std::sync::Arc;

use herald::{BroadcasterKey, Event, EventPattern, Hub, InlineBroadcaster, Listener, testing};

struct Noop;

impl Listener for Noop {
    fn on_event(&self, _event: &Event) {}
}

#[test]
fn global_controller_overrides_global_hub() {
    let hub = Hub::global();
    let original = Arc::new(InlineBroadcaster::new());
    hub.registry().set(BroadcasterKey::DEFAULT, original.clone());
    hub.listeners()
        .subscribe(Arc::new(Noop), EventPattern::Any, original);

    let ctl = testing::global();
    ctl.fake().unwrap();
    assert_eq!(
        hub.registry().get(&BroadcasterKey::DEFAULT).unwrap().name(),
        "FakeBroadcaster"
    );

    ctl.restore().unwrap();
    assert_eq!(
        hub.registry().get(&BroadcasterKey::DEFAULT).unwrap().name(),
        "InlineBroadcaster"
    );
    assert!(!ctl.is_enabled());
    assert!(ctl.force_reset().is_err());
}
