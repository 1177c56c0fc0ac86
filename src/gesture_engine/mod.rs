mod burst_hsm;
pub mod config;
pub mod features;
pub mod registry;
pub mod sequence;
pub mod shake;
pub mod trace;
pub mod types;
pub mod window;

pub use config::{
    active_config, BurstConfig, DispatchConfig, GestureEngineConfig, ShakeConfig,
    VolumeSequenceConfig,
};
pub use registry::{gesture_registry, GestureRegistration};
pub use sequence::ButtonSequenceDetector;
pub use shake::ShakeDetector;
pub use trace::DetectorTraceSample;
pub use types::{
    AccelerationSample, DetectorOutput, DetectorStateId, GestureConfirmed, GestureKind,
    KeyAction, KeyEvent, RejectReason, KEYCODE_VOLUME_UP,
};
pub use window::{PressWindow, PRESS_WINDOW_CAPACITY};
