use super::trace::DetectorTraceSample;

/// Android `KEYCODE_VOLUME_UP`.
pub const KEYCODE_VOLUME_UP: i32 = 24;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AccelerationSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub observed_at_ms: u64,
}

impl AccelerationSample {
    pub const fn new(x: f32, y: f32, z: f32, observed_at_ms: u64) -> Self {
        Self {
            x,
            y,
            z,
            observed_at_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum KeyAction {
    #[default]
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyEvent {
    pub code: i32,
    pub action: KeyAction,
    pub observed_at_ms: u64,
}

impl KeyEvent {
    pub const fn down(code: i32, observed_at_ms: u64) -> Self {
        Self {
            code,
            action: KeyAction::Down,
            observed_at_ms,
        }
    }

    pub const fn up(code: i32, observed_at_ms: u64) -> Self {
        Self {
            code,
            action: KeyAction::Up,
            observed_at_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum GestureKind {
    Shake = 1,
    ButtonSequence = 2,
}

impl GestureKind {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Shake => "shake",
            Self::ButtonSequence => "button_sequence",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GestureConfirmed {
    pub kind: GestureKind,
    pub at_ms: u64,
    /// Qualifying events in the window when the detector fired.
    pub count: u8,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DetectorOutput {
    pub confirmed: Option<GestureConfirmed>,
    pub trace: DetectorTraceSample,
}

impl DetectorOutput {
    pub fn fired(&self) -> bool {
        self.confirmed.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum RejectReason {
    #[default]
    None = 0,
    BelowThreshold = 1,
    NonFinite = 2,
    KeyMismatch = 3,
    KeyRelease = 4,
    WindowShort = 5,
    CooldownActive = 6,
    Detached = 7,
}

impl RejectReason {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BelowThreshold => "below_threshold",
            Self::NonFinite => "non_finite",
            Self::KeyMismatch => "key_mismatch",
            Self::KeyRelease => "key_release",
            Self::WindowShort => "window_short",
            Self::CooldownActive => "cooldown_active",
            Self::Detached => "detached",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum DetectorStateId {
    #[default]
    Idle = 0,
    Collecting = 1,
    Cooldown = 2,
    Detached = 3,
}

impl DetectorStateId {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Collecting => "collecting",
            Self::Cooldown => "cooldown",
            Self::Detached => "detached",
        }
    }
}
