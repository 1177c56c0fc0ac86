pub mod bridge;
pub mod collaborators;
pub mod memory;
pub mod notices;
pub mod types;

pub use bridge::{BridgeOutcome, GestureActionBridge};
pub use collaborators::{DispatchSink, LocationProvider, NotificationService};
pub use memory::{DeliveredNotification, FixedLocation, MemorySink, RecordingNotifier};
pub use notices::{Notification, NotificationPriority};
pub use types::{DispatchEvent, DispatchOrigin, EmergencyType, Location, Presence, ServerTimestamp};
