use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{
    config::BurstConfig,
    trace::DetectorTraceSample,
    types::{DetectorOutput, DetectorStateId, GestureConfirmed, GestureKind, RejectReason},
    window::PressWindow,
};

/// One event as seen by the window-and-cooldown policy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Stimulus {
    pub(crate) now_ms: u64,
    pub(crate) reason: RejectReason,
    pub(crate) magnitude: f32,
    pub(crate) key_code: i32,
}

#[derive(Clone, Copy, Debug)]
enum BurstEvent {
    Qualifying(Stimulus),
    Rejected(Stimulus),
    Stop,
}

#[derive(Default)]
struct DispatchContext {
    fired_count: Option<u8>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum FireDecision {
    Fired,
    WindowShort,
    CooldownActive,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BurstOutput {
    pub(crate) fired_count: Option<u8>,
    pub(crate) trace: DetectorTraceSample,
}

/// Counts qualifying events in a trailing window and fires at most once per
/// cooldown. Check and reset happen inside a single `&mut self` call, so no
/// second fire can interleave.
pub(crate) struct BurstEngine {
    machine: statig::blocking::StateMachine<BurstHsm>,
}

impl BurstEngine {
    pub(crate) fn new(config: BurstConfig) -> Self {
        Self {
            machine: BurstHsm::new(config).state_machine(),
        }
    }

    pub(crate) fn qualifying(&mut self, stimulus: Stimulus) -> BurstOutput {
        self.handle(BurstEvent::Qualifying(stimulus))
    }

    pub(crate) fn rejected(&mut self, stimulus: Stimulus) -> BurstOutput {
        self.handle(BurstEvent::Rejected(stimulus))
    }

    pub(crate) fn stop(&mut self) -> BurstOutput {
        self.handle(BurstEvent::Stop)
    }

    pub(crate) fn is_detached(&self) -> bool {
        self.machine.inner().detached
    }

    pub(crate) fn window_len(&self) -> usize {
        self.machine.inner().window.len()
    }

    pub(crate) fn last_fire_at_ms(&self) -> Option<u64> {
        self.machine.inner().last_fire_at_ms
    }

    pub(crate) fn last_trace(&self) -> DetectorTraceSample {
        self.machine.inner().last_trace
    }

    fn handle(&mut self, event: BurstEvent) -> BurstOutput {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        BurstOutput {
            fired_count: context.fired_count,
            trace: self.machine.inner().last_trace,
        }
    }
}

/// Wraps a policy step as a detector output for `kind`, logging fires and
/// cooldown suppressions.
pub(crate) fn confirm(kind: GestureKind, output: BurstOutput) -> DetectorOutput {
    let confirmed = output.fired_count.map(|count| {
        log::info!(
            "gesture: fired kind={} at_ms={} count={}",
            kind.label(),
            output.trace.now_ms,
            count
        );
        GestureConfirmed {
            kind,
            at_ms: output.trace.now_ms,
            count,
        }
    });

    if confirmed.is_none() && output.trace.cooldown_active == 1 {
        log::debug!(
            "gesture: suppressed kind={} at_ms={} window_len={}",
            kind.label(),
            output.trace.now_ms,
            output.trace.window_len
        );
    }

    DetectorOutput {
        confirmed,
        trace: output.trace,
    }
}

struct BurstHsm {
    config: BurstConfig,
    window: PressWindow,
    last_fire_at_ms: Option<u64>,
    detached: bool,
    last_trace: DetectorTraceSample,
}

impl BurstHsm {
    fn new(config: BurstConfig) -> Self {
        Self {
            config,
            window: PressWindow::new(),
            last_fire_at_ms: None,
            detached: false,
            last_trace: DetectorTraceSample::default(),
        }
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        self.last_fire_at_ms
            .map_or(true, |last| now_ms.saturating_sub(last) > self.config.cooldown_ms)
    }

    fn window_len_u8(&self) -> u8 {
        self.window.len().min(u8::MAX as usize) as u8
    }

    fn admit_and_check(
        &mut self,
        context: &mut DispatchContext,
        state_id: DetectorStateId,
        stimulus: Stimulus,
    ) -> FireDecision {
        self.window.record(stimulus.now_ms);
        self.window.prune(stimulus.now_ms, self.config.window_ms);

        let decision = if self.window.len() < usize::from(self.config.required_count) {
            FireDecision::WindowShort
        } else if !self.cooldown_elapsed(stimulus.now_ms) {
            FireDecision::CooldownActive
        } else {
            let count = self.window_len_u8();
            self.window.clear();
            self.last_fire_at_ms = Some(stimulus.now_ms);
            context.fired_count = Some(count);
            FireDecision::Fired
        };

        let reason = match decision {
            FireDecision::Fired => RejectReason::None,
            FireDecision::WindowShort => RejectReason::WindowShort,
            FireDecision::CooldownActive => RejectReason::CooldownActive,
        };
        self.update_trace(state_id, stimulus, reason, decision == FireDecision::Fired);
        decision
    }

    fn note_rejected(&mut self, state_id: DetectorStateId, stimulus: Stimulus) {
        self.update_trace(state_id, stimulus, stimulus.reason, false);
    }

    fn update_trace(
        &mut self,
        state_id: DetectorStateId,
        stimulus: Stimulus,
        reason: RejectReason,
        fired: bool,
    ) {
        self.last_trace = DetectorTraceSample {
            now_ms: stimulus.now_ms,
            state_id,
            reject_reason: reason,
            window_len: self.window_len_u8(),
            cooldown_active: if self.cooldown_elapsed(stimulus.now_ms) { 0 } else { 1 },
            fired: if fired { 1 } else { 0 },
            magnitude: stimulus.magnitude,
            key_code: stimulus.key_code,
        };
    }

    fn update_detached_trace(&mut self, reason: RejectReason) {
        self.last_trace = DetectorTraceSample {
            now_ms: self.last_trace.now_ms,
            state_id: DetectorStateId::Detached,
            reject_reason: reason,
            window_len: 0,
            cooldown_active: 0,
            fired: 0,
            magnitude: 0.0,
            key_code: 0,
        };
    }
}

#[state_machine(initial = "State::idle()")]
impl BurstHsm {
    #[state(superstate = "armed")]
    fn idle(&mut self, context: &mut DispatchContext, event: &BurstEvent) -> Outcome<State> {
        match event {
            BurstEvent::Qualifying(stimulus) => {
                match self.admit_and_check(context, DetectorStateId::Idle, *stimulus) {
                    FireDecision::Fired | FireDecision::CooldownActive => {
                        Transition(State::cooldown())
                    }
                    FireDecision::WindowShort => Transition(State::collecting()),
                }
            }
            BurstEvent::Rejected(stimulus) => {
                self.note_rejected(DetectorStateId::Idle, *stimulus);
                Handled
            }
            BurstEvent::Stop => Super,
        }
    }

    #[state(superstate = "armed")]
    fn collecting(&mut self, context: &mut DispatchContext, event: &BurstEvent) -> Outcome<State> {
        match event {
            BurstEvent::Qualifying(stimulus) => {
                match self.admit_and_check(context, DetectorStateId::Collecting, *stimulus) {
                    FireDecision::Fired | FireDecision::CooldownActive => {
                        Transition(State::cooldown())
                    }
                    FireDecision::WindowShort => Handled,
                }
            }
            BurstEvent::Rejected(stimulus) => {
                self.note_rejected(DetectorStateId::Collecting, *stimulus);
                Handled
            }
            BurstEvent::Stop => Super,
        }
    }

    #[state(superstate = "armed")]
    fn cooldown(&mut self, context: &mut DispatchContext, event: &BurstEvent) -> Outcome<State> {
        match event {
            BurstEvent::Qualifying(stimulus) => {
                match self.admit_and_check(context, DetectorStateId::Cooldown, *stimulus) {
                    FireDecision::Fired | FireDecision::CooldownActive => Handled,
                    FireDecision::WindowShort if self.cooldown_elapsed(stimulus.now_ms) => {
                        Transition(State::collecting())
                    }
                    FireDecision::WindowShort => Handled,
                }
            }
            BurstEvent::Rejected(stimulus) => {
                self.note_rejected(DetectorStateId::Cooldown, *stimulus);
                Handled
            }
            BurstEvent::Stop => Super,
        }
    }

    #[state]
    fn detached(&mut self, context: &mut DispatchContext, event: &BurstEvent) -> Outcome<State> {
        let _ = context;
        let _ = event;
        self.update_detached_trace(RejectReason::Detached);
        Handled
    }

    #[superstate]
    fn armed(&mut self, context: &mut DispatchContext, event: &BurstEvent) -> Outcome<State> {
        let _ = context;
        match event {
            BurstEvent::Stop => {
                self.window.clear();
                self.detached = true;
                self.update_detached_trace(RejectReason::None);
                Transition(State::detached())
            }
            _ => Handled,
        }
    }
}
