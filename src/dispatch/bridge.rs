use crate::{
    error::DispatchError,
    gesture_engine::{DispatchConfig, GestureConfirmed, GestureKind},
};

use super::{
    collaborators::{DispatchSink, LocationProvider, NotificationService},
    notices::Notification,
    types::{DispatchEvent, DispatchOrigin, EmergencyType, Presence},
};

#[derive(Clone, Debug, PartialEq)]
pub enum BridgeOutcome {
    /// Shake: the user still has to pick an emergency type.
    AlertRaised,
    Dispatched(DispatchEvent),
    DispatchFailed(DispatchError),
}

impl BridgeOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::AlertRaised => "alert_raised",
            Self::Dispatched(_) => "dispatched",
            Self::DispatchFailed(_) => "dispatch_failed",
        }
    }
}

/// Turns confirmed gestures into alerts and dispatch writes.
///
/// Every dispatch attempt ends in exactly one user-facing notification:
/// a success notice or a failure notice. Failed writes are not retried and
/// do not touch any detector state.
pub struct GestureActionBridge<S, N, L> {
    config: DispatchConfig,
    sink: S,
    notifier: N,
    location: L,
}

impl<S, N, L> GestureActionBridge<S, N, L>
where
    S: DispatchSink,
    N: NotificationService,
    L: LocationProvider,
{
    pub fn new(config: DispatchConfig, sink: S, notifier: N, location: L) -> Self {
        Self {
            config,
            sink,
            notifier,
            location,
        }
    }

    pub fn on_gesture_confirmed(
        &mut self,
        confirmed: GestureConfirmed,
        presence: Presence,
    ) -> BridgeOutcome {
        match confirmed.kind {
            GestureKind::Shake => {
                log::info!(
                    "bridge: alert kind=shake at_ms={} presence={}",
                    confirmed.at_ms,
                    presence.label()
                );
                self.notifier
                    .notify(&Notification::shake_detected(presence), presence);
                BridgeOutcome::AlertRaised
            }
            GestureKind::ButtonSequence => {
                let emergency_type = self.config.sequence_emergency;
                // Heads-up for a hidden screen only; a foreground user sees the
                // dispatch result instead.
                if presence == Presence::Background {
                    self.notifier.notify(
                        &Notification::sequence_dispatching(emergency_type),
                        Presence::Background,
                    );
                }
                self.dispatch(emergency_type, DispatchOrigin::ButtonSequence, presence)
            }
        }
    }

    /// Direct button press on one of the labelled emergency buttons.
    pub fn dispatch_manual(
        &mut self,
        emergency_type: EmergencyType,
        presence: Presence,
    ) -> BridgeOutcome {
        self.dispatch(emergency_type, DispatchOrigin::Manual, presence)
    }

    fn dispatch(
        &mut self,
        emergency_type: EmergencyType,
        origin: DispatchOrigin,
        presence: Presence,
    ) -> BridgeOutcome {
        match self.try_dispatch(emergency_type) {
            Ok(event) => {
                log::info!(
                    "bridge: dispatched type={} origin={} path={}",
                    emergency_type.label(),
                    origin.label(),
                    self.config.status_path
                );
                self.notifier
                    .notify(&Notification::dispatch_succeeded(&event), presence);
                BridgeOutcome::Dispatched(event)
            }
            Err(err) => {
                log::warn!(
                    "bridge: dispatch failed type={} origin={} err={}",
                    emergency_type.label(),
                    origin.label(),
                    err
                );
                self.notifier
                    .notify(&Notification::dispatch_failed(&err), presence);
                BridgeOutcome::DispatchFailed(err)
            }
        }
    }

    fn try_dispatch(&mut self, emergency_type: EmergencyType) -> Result<DispatchEvent, DispatchError> {
        let location = self
            .location
            .last_known()
            .ok_or(DispatchError::LocationUnavailable)?;
        let event = DispatchEvent::new(emergency_type, location);
        self.sink.write(self.config.status_path, &event)?;
        Ok(event)
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }
}

#[cfg(test)]
mod tests;
