use serde_json::Value;

use super::*;
use crate::{
    dispatch::{
        memory::{FixedLocation, MemorySink, RecordingNotifier},
        notices::NotificationPriority,
        types::Location,
    },
    error::SinkError,
};

type TestBridge = GestureActionBridge<MemorySink, RecordingNotifier, FixedLocation>;

fn config() -> DispatchConfig {
    DispatchConfig {
        status_path: "drone_status",
        assistant_log_path: "emergency_events",
        sequence_emergency: EmergencyType::Medical,
    }
}

fn bridge(location: FixedLocation) -> TestBridge {
    GestureActionBridge::new(config(), MemorySink::new(), RecordingNotifier::new(), location)
}

fn confirmed(kind: GestureKind, at_ms: u64) -> GestureConfirmed {
    GestureConfirmed {
        kind,
        at_ms,
        count: 3,
    }
}

#[test]
fn shake_raises_alert_without_writing() {
    let mut bridge = bridge(FixedLocation::at(1.0, 2.0));

    let outcome = bridge.on_gesture_confirmed(confirmed(GestureKind::Shake, 900), Presence::Foreground);

    assert_eq!(outcome, BridgeOutcome::AlertRaised);
    assert_eq!(bridge.sink().writes(), 0);
    assert_eq!(bridge.notifier().titles(), vec!["Shake Detected!"]);
}

#[test]
fn background_shake_uses_system_notification_copy() {
    let mut bridge = bridge(FixedLocation::at(1.0, 2.0));
    let _ = bridge.on_gesture_confirmed(confirmed(GestureKind::Shake, 900), Presence::Background);

    let delivered = &bridge.notifier().delivered()[0];
    assert_eq!(delivered.presence, Presence::Background);
    assert_eq!(delivered.notification.title, "SHAKE DETECTED!");
    assert_eq!(delivered.notification.priority, NotificationPriority::High);
}

#[test]
fn button_sequence_dispatches_medical_to_status_record() {
    let mut bridge = bridge(FixedLocation::at(40.7128, -74.006));

    let outcome = bridge.on_gesture_confirmed(
        confirmed(GestureKind::ButtonSequence, 1_800),
        Presence::Foreground,
    );

    let BridgeOutcome::Dispatched(event) = outcome else {
        panic!("expected dispatch, got {outcome:?}");
    };
    assert_eq!(event.emergency_type, EmergencyType::Medical);
    assert_eq!(event.location(), Location::new(40.7128, -74.006));

    let record: Value =
        serde_json::from_str(bridge.sink().record("drone_status").expect("record written"))
            .expect("valid json");
    assert_eq!(record["type"], "medical");
    assert_eq!(record["timestamp"][".sv"], "timestamp");

    assert_eq!(bridge.notifier().titles(), vec!["Emergency Dispatched!"]);
}

#[test]
fn background_sequence_announces_dispatch_before_result() {
    let mut bridge = bridge(FixedLocation::at(40.7128, -74.006));

    let outcome = bridge.on_gesture_confirmed(
        confirmed(GestureKind::ButtonSequence, 1_800),
        Presence::Background,
    );

    assert!(outcome.is_dispatched());
    assert_eq!(
        bridge.notifier().titles(),
        vec!["EMERGENCY DISPATCH!", "Emergency Dispatched!"]
    );
    assert!(bridge
        .notifier()
        .delivered()
        .iter()
        .all(|d| d.presence == Presence::Background));
}

#[test]
fn foreground_sequence_without_location_only_reports_failure() {
    let mut bridge = bridge(FixedLocation::unknown());

    let outcome = bridge.on_gesture_confirmed(
        confirmed(GestureKind::ButtonSequence, 1_800),
        Presence::Foreground,
    );

    assert_eq!(
        outcome,
        BridgeOutcome::DispatchFailed(DispatchError::LocationUnavailable)
    );
    let delivered = bridge.notifier().delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(
        delivered[0].notification.body,
        "Location not available. Please wait and try again."
    );
    assert_eq!(delivered[0].presence, Presence::Foreground);
}

#[test]
fn dispatch_overwrites_single_record() {
    let mut bridge = bridge(FixedLocation::at(1.0, 2.0));
    let _ = bridge.dispatch_manual(EmergencyType::Fire, Presence::Foreground);
    let _ = bridge.dispatch_manual(EmergencyType::Patrol, Presence::Foreground);

    assert_eq!(bridge.sink().writes(), 2);
    let record: Value =
        serde_json::from_str(bridge.sink().record("drone_status").expect("record"))
            .expect("valid json");
    assert_eq!(record["type"], "patrol");
}

#[test]
fn sink_failure_notifies_once_and_is_not_retried() {
    let mut bridge = bridge(FixedLocation::at(1.0, 2.0));
    bridge.sink_mut().fail_with("network unreachable");

    let outcome = bridge.on_gesture_confirmed(
        confirmed(GestureKind::ButtonSequence, 1_800),
        Presence::Foreground,
    );

    assert_eq!(
        outcome,
        BridgeOutcome::DispatchFailed(DispatchError::Sink(SinkError::new("network unreachable")))
    );
    assert_eq!(bridge.sink().writes(), 0);
    let delivered = bridge.notifier().delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(
        delivered[0].notification.body,
        "Failed to send emergency data: network unreachable"
    );
}

#[test]
fn missing_location_is_surfaced_not_silent() {
    let mut bridge = bridge(FixedLocation::unknown());

    let outcome = bridge.dispatch_manual(EmergencyType::Medical, Presence::Foreground);

    assert_eq!(
        outcome,
        BridgeOutcome::DispatchFailed(DispatchError::LocationUnavailable)
    );
    assert_eq!(bridge.sink().writes(), 0);
    assert_eq!(
        bridge.notifier().delivered()[0].notification.body,
        "Location not available. Please wait and try again."
    );

    bridge.location_mut().set(Some(Location::new(3.0, 4.0)));
    assert!(bridge
        .dispatch_manual(EmergencyType::Medical, Presence::Foreground)
        .is_dispatched());
}

#[test]
fn configured_sequence_emergency_is_used() {
    let mut bridge = GestureActionBridge::new(
        DispatchConfig {
            sequence_emergency: EmergencyType::Fire,
            ..config()
        },
        MemorySink::new(),
        RecordingNotifier::new(),
        FixedLocation::at(0.5, 0.5),
    );
    let outcome = bridge.on_gesture_confirmed(
        confirmed(GestureKind::ButtonSequence, 10),
        Presence::Background,
    );
    let BridgeOutcome::Dispatched(event) = outcome else {
        panic!("expected dispatch");
    };
    assert_eq!(event.emergency_type, EmergencyType::Fire);
}
