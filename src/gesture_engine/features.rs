use super::types::{AccelerationSample, KeyAction, KeyEvent, RejectReason};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampleAssessment {
    pub qualifying: bool,
    pub magnitude: f32,
    pub reason: RejectReason,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct KeyAssessment {
    pub qualifying: bool,
    pub reason: RejectReason,
}

/// Euclidean norm of the sample; non-finite input reads as 0.
pub fn acceleration_magnitude(sample: &AccelerationSample) -> f32 {
    let magnitude = sample.x.hypot(sample.y).hypot(sample.z);
    if magnitude.is_finite() {
        magnitude
    } else {
        0.0
    }
}

pub fn assess_sample(sample: &AccelerationSample, magnitude_threshold: f32) -> SampleAssessment {
    let finite = sample.x.is_finite() && sample.y.is_finite() && sample.z.is_finite();
    let magnitude = acceleration_magnitude(sample);

    if !finite {
        return SampleAssessment {
            qualifying: false,
            magnitude: 0.0,
            reason: RejectReason::NonFinite,
        };
    }

    if magnitude <= magnitude_threshold {
        return SampleAssessment {
            qualifying: false,
            magnitude,
            reason: RejectReason::BelowThreshold,
        };
    }

    SampleAssessment {
        qualifying: true,
        magnitude,
        reason: RejectReason::None,
    }
}

/// Key repeat arrives as further `Down` events and each one counts.
pub fn assess_key(event: &KeyEvent, trigger_key_code: i32) -> KeyAssessment {
    if event.code != trigger_key_code {
        return KeyAssessment {
            qualifying: false,
            reason: RejectReason::KeyMismatch,
        };
    }

    match event.action {
        KeyAction::Down => KeyAssessment {
            qualifying: true,
            reason: RejectReason::None,
        },
        KeyAction::Up => KeyAssessment {
            qualifying: false,
            reason: RejectReason::KeyRelease,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::KEYCODE_VOLUME_UP;
    use super::*;

    #[test]
    fn magnitude_is_three_axis_norm() {
        let sample = AccelerationSample::new(3.0, 4.0, 12.0, 0);
        assert!((acceleration_magnitude(&sample) - 13.0).abs() < 1e-5);
    }

    #[test]
    fn threshold_is_exclusive() {
        let at_threshold = AccelerationSample::new(2.5, 0.0, 0.0, 0);
        let assessment = assess_sample(&at_threshold, 2.5);
        assert!(!assessment.qualifying);
        assert_eq!(assessment.reason, RejectReason::BelowThreshold);

        let above = AccelerationSample::new(2.6, 0.0, 0.0, 0);
        assert!(assess_sample(&above, 2.5).qualifying);
    }

    #[test]
    fn non_finite_axes_never_qualify() {
        for sample in [
            AccelerationSample::new(f32::NAN, 0.0, 0.0, 0),
            AccelerationSample::new(0.0, f32::INFINITY, 0.0, 0),
            AccelerationSample::new(0.0, 0.0, f32::NEG_INFINITY, 0),
        ] {
            let assessment = assess_sample(&sample, 0.1);
            assert!(!assessment.qualifying);
            assert_eq!(assessment.magnitude, 0.0);
            assert_eq!(assessment.reason, RejectReason::NonFinite);
        }
    }

    #[test]
    fn large_finite_axes_keep_their_magnitude() {
        let sample = AccelerationSample::new(1e20, 0.0, 0.0, 0);
        assert_eq!(acceleration_magnitude(&sample), 1e20);

        let assessment = assess_sample(&sample, 2.5);
        assert!(assessment.qualifying);
        assert_eq!(assessment.reason, RejectReason::None);
    }

    #[test]
    fn overflowing_magnitude_reads_as_zero() {
        let sample = AccelerationSample::new(f32::MAX, f32::MAX, 0.0, 0);
        assert_eq!(acceleration_magnitude(&sample), 0.0);
        assert!(!assess_sample(&sample, 2.5).qualifying);
    }

    #[test]
    fn only_trigger_key_down_qualifies() {
        assert!(assess_key(&KeyEvent::down(KEYCODE_VOLUME_UP, 0), KEYCODE_VOLUME_UP).qualifying);
        assert_eq!(
            assess_key(&KeyEvent::up(KEYCODE_VOLUME_UP, 0), KEYCODE_VOLUME_UP).reason,
            RejectReason::KeyRelease
        );
        assert_eq!(
            assess_key(&KeyEvent::down(25, 0), KEYCODE_VOLUME_UP).reason,
            RejectReason::KeyMismatch
        );
    }
}
