use crate::error::DispatchError;

use super::types::{DispatchEvent, EmergencyType, Presence};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub enum NotificationPriority {
    #[default]
    Default,
    High,
    Max,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub title: &'static str,
    pub body: String,
    pub priority: NotificationPriority,
}

impl Notification {
    pub fn shake_detected(presence: Presence) -> Self {
        match presence {
            Presence::Foreground => Self {
                title: "Shake Detected!",
                body: "Emergency shake gesture detected. Please select an emergency type.".into(),
                priority: NotificationPriority::High,
            },
            Presence::Background => Self {
                title: "SHAKE DETECTED!",
                body: "Tap to open Drone Rescue and select emergency type".into(),
                priority: NotificationPriority::High,
            },
        }
    }

    pub fn sequence_dispatching(emergency_type: EmergencyType) -> Self {
        Self {
            title: "EMERGENCY DISPATCH!",
            body: format!(
                "Volume sequence detected. {} emergency dispatched!",
                capitalized(emergency_type.label())
            ),
            priority: NotificationPriority::Max,
        }
    }

    pub fn dispatch_succeeded(event: &DispatchEvent) -> Self {
        Self {
            title: "Emergency Dispatched!",
            body: format!(
                "{} emergency has been sent to the drone nerve center.\n\nLocation: {:.6}, {:.6}",
                event.emergency_type.label().to_ascii_uppercase(),
                event.latitude,
                event.longitude
            ),
            priority: NotificationPriority::Default,
        }
    }

    pub fn dispatch_failed(err: &DispatchError) -> Self {
        let body = match err {
            DispatchError::LocationUnavailable => {
                "Location not available. Please wait and try again.".to_string()
            }
            DispatchError::Sink(sink_err) => {
                format!("Failed to send emergency data: {sink_err}")
            }
        };
        Self {
            title: "Error",
            body,
            priority: NotificationPriority::Max,
        }
    }
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
