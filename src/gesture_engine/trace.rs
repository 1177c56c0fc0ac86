use super::types::{DetectorStateId, RejectReason};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DetectorTraceSample {
    pub now_ms: u64,
    pub state_id: DetectorStateId,
    pub reject_reason: RejectReason,
    pub window_len: u8,
    pub cooldown_active: u8,
    pub fired: u8,
    /// Zero for key events.
    pub magnitude: f32,
    /// Zero for acceleration samples.
    pub key_code: i32,
}
