use crate::error::GestureError;

use super::{
    burst_hsm::{confirm, BurstEngine, Stimulus},
    config::VolumeSequenceConfig,
    features::assess_key,
    trace::DetectorTraceSample,
    types::{DetectorOutput, GestureKind, KeyEvent},
};

/// Recognises a press burst of the trigger key. No debouncing beyond the
/// window itself, so OS key repeat counts press by press.
pub struct ButtonSequenceDetector {
    config: VolumeSequenceConfig,
    engine: BurstEngine,
}

impl ButtonSequenceDetector {
    pub fn new(config: VolumeSequenceConfig) -> Result<Self, GestureError> {
        config.validate()?;
        Ok(Self {
            config,
            engine: BurstEngine::new(config.burst),
        })
    }

    pub fn config(&self) -> &VolumeSequenceConfig {
        &self.config
    }

    pub fn on_key_event(&mut self, event: KeyEvent) -> DetectorOutput {
        let assessment = assess_key(&event, self.config.trigger_key_code);
        let stimulus = Stimulus {
            now_ms: event.observed_at_ms,
            reason: assessment.reason,
            magnitude: 0.0,
            key_code: event.code,
        };

        let output = if assessment.qualifying {
            self.engine.qualifying(stimulus)
        } else {
            self.engine.rejected(stimulus)
        };
        confirm(GestureKind::ButtonSequence, output)
    }

    pub fn stop(&mut self) {
        if !self.engine.is_detached() {
            let _ = self.engine.stop();
            log::info!("gesture: detector stopped kind=button_sequence");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.engine.is_detached()
    }

    pub fn last_trace(&self) -> DetectorTraceSample {
        self.engine.last_trace()
    }
}
