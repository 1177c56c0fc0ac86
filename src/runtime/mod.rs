//! Single-threaded glue between platform sources, the detectors and the
//! action bridge.
//!
//! Platform callbacks only enqueue. [`GestureRuntime::pump`] drains the queue
//! in arrival order and runs every detector step and bridge action to
//! completion before taking the next event.

pub mod counters;
pub mod sources;

use embassy_sync::{
    blocking_mutex::raw::NoopRawMutex,
    channel::{Channel, TrySendError},
};

use crate::{
    dispatch::{
        BridgeOutcome, DispatchSink, EmergencyType, GestureActionBridge, LocationProvider,
        NotificationService, Presence,
    },
    error::GestureError,
    gesture_engine::{
        registry::is_enabled, AccelerationSample, ButtonSequenceDetector, DetectorTraceSample,
        GestureConfirmed, GestureEngineConfig, GestureKind, KeyEvent, ShakeDetector,
    },
};

pub use counters::RuntimeCounters;
pub use sources::{HostSource, KeyEventSource, MotionSource};

pub const INPUT_QUEUE_DEPTH: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Motion(AccelerationSample),
    Key(KeyEvent),
    Presence(Presence),
}

/// A confirmed gesture and what the bridge did with it.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureDecision {
    pub confirmed: GestureConfirmed,
    pub outcome: BridgeOutcome,
}

struct ShakeChannel {
    detector: ShakeDetector,
    source: Option<Box<dyn MotionSource>>,
}

struct SequenceChannel {
    detector: ButtonSequenceDetector,
    source: Option<Box<dyn KeyEventSource>>,
}

pub struct GestureRuntime<S, N, L> {
    config: GestureEngineConfig,
    queue: Channel<NoopRawMutex, InputEvent, INPUT_QUEUE_DEPTH>,
    shake: Option<ShakeChannel>,
    sequence: Option<SequenceChannel>,
    bridge: GestureActionBridge<S, N, L>,
    presence: Presence,
    counters: RuntimeCounters,
}

impl<S, N, L> GestureRuntime<S, N, L>
where
    S: DispatchSink,
    N: NotificationService,
    L: LocationProvider,
{
    pub fn new(config: GestureEngineConfig, sink: S, notifier: N, location: L) -> Self {
        Self {
            config,
            queue: Channel::new(),
            shake: None,
            sequence: None,
            bridge: GestureActionBridge::new(config.dispatch, sink, notifier, location),
            presence: Presence::Foreground,
            counters: RuntimeCounters::default(),
        }
    }

    pub fn config(&self) -> &GestureEngineConfig {
        &self.config
    }

    pub fn attach_shake(&mut self, mut source: Box<dyn MotionSource>) -> Result<(), GestureError> {
        let kind = GestureKind::Shake;
        if !is_enabled(&self.config, kind) {
            return Err(GestureError::ChannelDisabled(kind));
        }
        if self.shake.as_ref().is_some_and(|c| c.source.is_some()) {
            return Err(GestureError::AlreadyAttached(kind));
        }

        let detector = ShakeDetector::new(self.config.shake)?;
        source
            .start(self.config.shake.sample_interval_ms)
            .map_err(|err| unavailable(kind, err.reason))?;

        log::info!(
            "runtime: attached kind=shake interval_ms={}",
            self.config.shake.sample_interval_ms
        );
        self.shake = Some(ShakeChannel {
            detector,
            source: Some(source),
        });
        Ok(())
    }

    pub fn attach_button_sequence(
        &mut self,
        mut source: Box<dyn KeyEventSource>,
    ) -> Result<(), GestureError> {
        let kind = GestureKind::ButtonSequence;
        if !is_enabled(&self.config, kind) {
            return Err(GestureError::ChannelDisabled(kind));
        }
        if self.sequence.as_ref().is_some_and(|c| c.source.is_some()) {
            return Err(GestureError::AlreadyAttached(kind));
        }

        let detector = ButtonSequenceDetector::new(self.config.volume_sequence)?;
        source
            .start()
            .map_err(|err| unavailable(kind, err.reason))?;

        log::info!(
            "runtime: attached kind=button_sequence key_code={}",
            self.config.volume_sequence.trigger_key_code
        );
        self.sequence = Some(SequenceChannel {
            detector,
            source: Some(source),
        });
        Ok(())
    }

    /// Stops the detector first, then the source. Samples already queued are
    /// still drained but can no longer fire.
    pub fn detach_shake(&mut self) -> Option<Box<dyn MotionSource>> {
        let channel = self.shake.as_mut()?;
        channel.detector.stop();
        let mut source = channel.source.take()?;
        source.stop();
        Some(source)
    }

    pub fn detach_button_sequence(&mut self) -> Option<Box<dyn KeyEventSource>> {
        let channel = self.sequence.as_mut()?;
        channel.detector.stop();
        let mut source = channel.source.take()?;
        source.stop();
        Some(source)
    }

    pub fn is_attached(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Shake => self.shake.as_ref().is_some_and(|c| c.source.is_some()),
            GestureKind::ButtonSequence => {
                self.sequence.as_ref().is_some_and(|c| c.source.is_some())
            }
        }
    }

    pub fn submit(&mut self, event: InputEvent) -> Result<(), GestureError> {
        match self.queue.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.counters.dropped = self.counters.dropped.saturating_add(1);
                log::warn!(
                    "runtime: queue full dropped={} depth={}",
                    self.counters.dropped,
                    INPUT_QUEUE_DEPTH
                );
                Err(GestureError::QueueFull)
            }
        }
    }

    pub fn submit_sample(&mut self, sample: AccelerationSample) -> Result<(), GestureError> {
        self.submit(InputEvent::Motion(sample))
    }

    pub fn submit_key(&mut self, event: KeyEvent) -> Result<(), GestureError> {
        self.submit(InputEvent::Key(event))
    }

    pub fn set_presence(&mut self, presence: Presence) -> Result<(), GestureError> {
        self.submit(InputEvent::Presence(presence))
    }

    /// Drains every queued event and returns the gestures confirmed on the
    /// way, in order.
    pub fn pump(&mut self) -> Vec<GestureDecision> {
        let mut decisions = Vec::new();
        while let Ok(event) = self.queue.try_receive() {
            if let Some(decision) = self.process(event) {
                decisions.push(decision);
            }
        }
        decisions
    }

    fn process(&mut self, event: InputEvent) -> Option<GestureDecision> {
        let confirmed = match event {
            InputEvent::Motion(sample) => {
                self.counters.samples = self.counters.samples.saturating_add(1);
                let channel = self.shake.as_mut()?;
                channel.detector.on_sample(sample).confirmed?
            }
            InputEvent::Key(key) => {
                self.counters.key_events = self.counters.key_events.saturating_add(1);
                let channel = self.sequence.as_mut()?;
                channel.detector.on_key_event(key).confirmed?
            }
            InputEvent::Presence(presence) => {
                if presence != self.presence {
                    log::debug!("runtime: presence={}", presence.label());
                }
                self.presence = presence;
                return None;
            }
        };

        self.counters.note_confirmed(confirmed.kind);
        let outcome = self.bridge.on_gesture_confirmed(confirmed, self.presence);
        self.counters.note_outcome(&outcome);
        Some(GestureDecision { confirmed, outcome })
    }

    /// On-screen emergency button. Bypasses the queue.
    pub fn dispatch_manual(&mut self, emergency_type: EmergencyType) -> BridgeOutcome {
        let outcome = self.bridge.dispatch_manual(emergency_type, self.presence);
        self.counters.note_outcome(&outcome);
        outcome
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn counters(&self) -> RuntimeCounters {
        self.counters
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn last_trace(&self, kind: GestureKind) -> Option<DetectorTraceSample> {
        match kind {
            GestureKind::Shake => self.shake.as_ref().map(|c| c.detector.last_trace()),
            GestureKind::ButtonSequence => {
                self.sequence.as_ref().map(|c| c.detector.last_trace())
            }
        }
    }

    pub fn bridge(&self) -> &GestureActionBridge<S, N, L> {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut GestureActionBridge<S, N, L> {
        &mut self.bridge
    }
}

fn unavailable(kind: GestureKind, reason: String) -> GestureError {
    log::warn!("runtime: source unavailable kind={} reason={}", kind.label(), reason);
    GestureError::SourceUnavailable { kind, reason }
}
