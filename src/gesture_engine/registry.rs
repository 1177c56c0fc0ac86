use super::{config::GestureEngineConfig, types::GestureKind};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GestureRegistration {
    pub kind: GestureKind,
    pub enabled: bool,
}

pub fn gesture_registry(config: &GestureEngineConfig) -> [GestureRegistration; 2] {
    [
        GestureRegistration {
            kind: GestureKind::Shake,
            enabled: config.shake.enabled,
        },
        GestureRegistration {
            kind: GestureKind::ButtonSequence,
            enabled: config.volume_sequence.enabled,
        },
    ]
}

pub fn is_enabled(config: &GestureEngineConfig, kind: GestureKind) -> bool {
    gesture_registry(config)
        .iter()
        .any(|registration| registration.kind == kind && registration.enabled)
}
