//! Gesture-to-dispatch core for the Drone Rescue client: shake and
//! volume-button detectors, the shared cooldown policy, and the bridge that
//! turns confirmed gestures into alerts and dispatch records.

#[cfg(feature = "assistant")]
pub mod assistant;
pub mod dispatch;
pub mod error;
pub mod gesture_engine;
pub mod runtime;

pub use dispatch::{
    BridgeOutcome, DispatchEvent, DispatchSink, EmergencyType, GestureActionBridge, Location,
    LocationProvider, Notification, NotificationService, Presence,
};
pub use error::{DispatchError, GestureError, SinkError, SourceUnavailable};
pub use gesture_engine::{
    active_config, AccelerationSample, ButtonSequenceDetector, GestureConfirmed,
    GestureEngineConfig, GestureKind, KeyEvent, ShakeDetector,
};
pub use runtime::{GestureDecision, GestureRuntime, InputEvent, RuntimeCounters};
