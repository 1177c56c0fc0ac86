use crate::error::SourceUnavailable;

/// Platform accelerometer subscription. Samples produced while started are
/// handed to [`super::GestureRuntime::submit_sample`].
pub trait MotionSource {
    fn start(&mut self, sample_interval_ms: u32) -> Result<(), SourceUnavailable>;
    fn stop(&mut self);
}

/// System-wide hardware key listener.
pub trait KeyEventSource {
    fn start(&mut self) -> Result<(), SourceUnavailable>;
    fn stop(&mut self);
}

/// Source handle for hosts that feed events by hand (replay, tests).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HostSource {
    running: bool,
    sample_interval_ms: Option<u32>,
    refusal: Option<String>,
    starts: u32,
}

impl HostSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose platform permission was denied.
    pub fn refusing(reason: impl Into<String>) -> Self {
        Self {
            refusal: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sample_interval_ms(&self) -> Option<u32> {
        self.sample_interval_ms
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }

    fn begin(&mut self) -> Result<(), SourceUnavailable> {
        if let Some(reason) = &self.refusal {
            return Err(SourceUnavailable::new(reason.clone()));
        }
        self.running = true;
        self.starts += 1;
        Ok(())
    }
}

impl MotionSource for HostSource {
    fn start(&mut self, sample_interval_ms: u32) -> Result<(), SourceUnavailable> {
        self.begin()?;
        self.sample_interval_ms = Some(sample_interval_ms);
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
    }
}

impl KeyEventSource for HostSource {
    fn start(&mut self) -> Result<(), SourceUnavailable> {
        self.begin()
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
