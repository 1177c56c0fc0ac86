use serde::Serialize;

use crate::{dispatch::BridgeOutcome, gesture_engine::GestureKind};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RuntimeCounters {
    pub samples: u32,
    pub key_events: u32,
    pub dropped: u32,
    pub shakes: u32,
    pub sequences: u32,
    pub dispatch_ok: u32,
    pub dispatch_failed: u32,
}

impl RuntimeCounters {
    pub(crate) fn note_confirmed(&mut self, kind: GestureKind) {
        match kind {
            GestureKind::Shake => self.shakes = self.shakes.saturating_add(1),
            GestureKind::ButtonSequence => self.sequences = self.sequences.saturating_add(1),
        }
    }

    pub(crate) fn note_outcome(&mut self, outcome: &BridgeOutcome) {
        match outcome {
            BridgeOutcome::AlertRaised => {}
            BridgeOutcome::Dispatched(_) => self.dispatch_ok = self.dispatch_ok.saturating_add(1),
            BridgeOutcome::DispatchFailed(_) => {
                self.dispatch_failed = self.dispatch_failed.saturating_add(1)
            }
        }
    }
}
