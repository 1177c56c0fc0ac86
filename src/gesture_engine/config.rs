use crate::{dispatch::EmergencyType, error::GestureError};

use super::window::PRESS_WINDOW_CAPACITY;

/// Window-and-cooldown policy shared by every gesture channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BurstConfig {
    pub required_count: u8,
    pub window_ms: u64,
    pub cooldown_ms: u64,
}

impl BurstConfig {
    pub fn validate(&self) -> Result<(), GestureError> {
        if self.required_count == 0 || usize::from(self.required_count) > PRESS_WINDOW_CAPACITY {
            return Err(GestureError::InvalidConfig(
                "required_count must be between 1 and the press window capacity",
            ));
        }
        if self.window_ms == 0 {
            return Err(GestureError::InvalidConfig("window_ms must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakeConfig {
    pub enabled: bool,
    pub magnitude_threshold: f32,
    pub sample_interval_ms: u32,
    pub burst: BurstConfig,
}

impl ShakeConfig {
    pub fn validate(&self) -> Result<(), GestureError> {
        if !self.magnitude_threshold.is_finite() || self.magnitude_threshold <= 0.0 {
            return Err(GestureError::InvalidConfig(
                "magnitude_threshold must be finite and > 0",
            ));
        }
        if self.sample_interval_ms == 0 {
            return Err(GestureError::InvalidConfig("sample_interval_ms must be > 0"));
        }
        self.burst.validate()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VolumeSequenceConfig {
    pub enabled: bool,
    pub trigger_key_code: i32,
    pub burst: BurstConfig,
}

impl VolumeSequenceConfig {
    pub fn validate(&self) -> Result<(), GestureError> {
        self.burst.validate()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DispatchConfig {
    /// Single record overwritten by every dispatch.
    pub status_path: &'static str,
    /// Append-only log fed by the assistant keyword scanner.
    pub assistant_log_path: &'static str,
    /// Emergency type sent when the button sequence fires.
    pub sequence_emergency: EmergencyType,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEngineConfig {
    pub shake: ShakeConfig,
    pub volume_sequence: VolumeSequenceConfig,
    pub dispatch: DispatchConfig,
}

include!(concat!(env!("OUT_DIR"), "/gesture_config.rs"));

pub fn active_config() -> &'static GestureEngineConfig {
    &GESTURE_ENGINE_CONFIG
}
