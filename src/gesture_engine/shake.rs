use crate::error::GestureError;

use super::{
    burst_hsm::{confirm, BurstEngine, Stimulus},
    config::ShakeConfig,
    features::assess_sample,
    trace::DetectorTraceSample,
    types::{AccelerationSample, DetectorOutput, GestureKind},
};

/// Recognises a strong shake burst: `required_count` samples above
/// `magnitude_threshold` inside the trailing window.
pub struct ShakeDetector {
    config: ShakeConfig,
    engine: BurstEngine,
}

impl ShakeDetector {
    pub fn new(config: ShakeConfig) -> Result<Self, GestureError> {
        config.validate()?;
        Ok(Self {
            config,
            engine: BurstEngine::new(config.burst),
        })
    }

    pub fn config(&self) -> &ShakeConfig {
        &self.config
    }

    pub fn on_sample(&mut self, sample: AccelerationSample) -> DetectorOutput {
        let assessment = assess_sample(&sample, self.config.magnitude_threshold);
        let stimulus = Stimulus {
            now_ms: sample.observed_at_ms,
            reason: assessment.reason,
            magnitude: assessment.magnitude,
            key_code: 0,
        };

        let output = if assessment.qualifying {
            self.engine.qualifying(stimulus)
        } else {
            self.engine.rejected(stimulus)
        };
        confirm(GestureKind::Shake, output)
    }

    pub fn stop(&mut self) {
        if !self.engine.is_detached() {
            let _ = self.engine.stop();
            log::info!("gesture: detector stopped kind=shake");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.engine.is_detached()
    }

    pub fn last_trace(&self) -> DetectorTraceSample {
        self.engine.last_trace()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{
        config::BurstConfig,
        types::{DetectorStateId, RejectReason},
    };
    use super::*;

    fn cfg() -> ShakeConfig {
        ShakeConfig {
            enabled: true,
            magnitude_threshold: 2.5,
            sample_interval_ms: 100,
            burst: BurstConfig {
                required_count: 3,
                window_ms: 1_000,
                cooldown_ms: 3_000,
            },
        }
    }

    fn sample(magnitude: f32, at_ms: u64) -> AccelerationSample {
        AccelerationSample::new(magnitude, 0.0, 0.0, at_ms)
    }

    #[test]
    fn mixed_burst_fires_on_third_qualifying_sample() {
        let mut detector = ShakeDetector::new(cfg()).expect("valid config");

        let outputs: Vec<DetectorOutput> = [(3.0, 0), (3.1, 300), (0.5, 500), (3.2, 900)]
            .into_iter()
            .map(|(magnitude, at_ms)| detector.on_sample(sample(magnitude, at_ms)))
            .collect();

        assert!(!outputs[0].fired());
        assert!(!outputs[1].fired());
        assert!(!outputs[2].fired());
        assert_eq!(outputs[2].trace.reject_reason, RejectReason::BelowThreshold);
        assert_eq!(outputs[2].trace.window_len, 2);

        let confirmed = outputs[3].confirmed.expect("fires at t=900");
        assert_eq!(confirmed.kind, GestureKind::Shake);
        assert_eq!(confirmed.at_ms, 900);
        assert_eq!(confirmed.count, 3);
    }

    #[test]
    fn gravity_and_handling_noise_never_fire() {
        let mut detector = ShakeDetector::new(cfg()).expect("valid config");
        let fired = (0..200u64)
            .map(|i| {
                let wobble = (i % 7) as f32 * 0.2;
                detector.on_sample(AccelerationSample::new(0.1, 0.2, 1.0 + wobble, i * 100))
            })
            .filter(DetectorOutput::fired)
            .count();
        assert_eq!(fired, 0);
    }

    #[test]
    fn nan_sample_is_ignored_without_resetting_window() {
        let mut detector = ShakeDetector::new(cfg()).expect("valid config");
        let _ = detector.on_sample(sample(3.0, 0));
        let _ = detector.on_sample(sample(3.0, 100));
        let noise = detector.on_sample(AccelerationSample::new(f32::NAN, 1.0, 1.0, 150));
        assert_eq!(noise.trace.reject_reason, RejectReason::NonFinite);
        assert_eq!(noise.trace.magnitude, 0.0);
        assert!(detector.on_sample(sample(3.0, 200)).fired());
    }

    #[test]
    fn stopped_detector_never_fires() {
        let mut detector = ShakeDetector::new(cfg()).expect("valid config");
        let _ = detector.on_sample(sample(3.0, 0));
        detector.stop();
        assert!(detector.is_stopped());

        for at_ms in [100, 200, 300, 400] {
            assert!(!detector.on_sample(sample(9.0, at_ms)).fired());
        }
        assert_eq!(detector.last_trace().state_id, DetectorStateId::Detached);
    }

    #[test]
    fn invalid_threshold_fails_construction() {
        let config = ShakeConfig {
            magnitude_threshold: 0.0,
            ..cfg()
        };
        assert!(matches!(
            ShakeDetector::new(config),
            Err(GestureError::InvalidConfig(_))
        ));
    }
}
