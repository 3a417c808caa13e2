use statig::prelude::*;

use crate::config::GameConfig;

use super::detector::{DetectionState, MovementAssessment, MovementDetector};
use super::history::ScoreHistory;
use super::types::{Command, GameEvent, GamePhase};

/// Poll ticks since the last phase toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleCounter {
    ticks: u32,
    threshold: u32,
}

impl CycleCounter {
    pub const fn new(threshold: u32) -> Self {
        Self {
            ticks: 0,
            threshold,
        }
    }

    pub const fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Counts one tick; returns true and rewinds when the threshold is hit.
    pub fn advance(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks >= self.threshold {
            self.ticks = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}

pub(super) struct GameMachine {
    pub(super) config: GameConfig,
    pub(super) detector: MovementDetector,
    pub(super) history: ScoreHistory,
    pub(super) detection: DetectionState,
    pub(super) cycle: CycleCounter,
    pub(super) release_at_ms: Option<u64>,
    pub(super) phase: Option<GamePhase>,
    pub(super) stopped: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub(super) struct DispatchContext {
    pub(super) command: Option<Command>,
    pub(super) detection: Option<MovementAssessment>,
    pub(super) entered: Option<GamePhase>,
}

impl GameMachine {
    pub(super) fn new(config: GameConfig) -> Self {
        Self {
            detector: MovementDetector::from_config(&config),
            history: ScoreHistory::new(config.history_len),
            detection: DetectionState::new(config.cooldown_ms),
            cycle: CycleCounter::new(config.cycle_toggle_ticks),
            release_at_ms: None,
            phase: None,
            stopped: false,
            config,
        }
    }

    fn toggle_phase(&mut self, context: &mut DispatchContext) -> Outcome<State> {
        match self.phase {
            Some(phase) => self.enter_phase(phase.toggled(), context),
            None => Handled,
        }
    }

    fn enter_phase(&mut self, phase: GamePhase, context: &mut DispatchContext) -> Outcome<State> {
        self.phase = Some(phase);
        self.history.reset();
        self.cycle.reset();
        if matches!(phase, GamePhase::Relaxed) {
            // An elimination still buzzing when the light turns green is not
            // followed by an OFF; the green-light ON supersedes it.
            self.release_at_ms = None;
        }
        context.command = Some(phase.entry_command());
        context.entered = Some(phase);
        match phase {
            GamePhase::Armed => Transition(State::armed()),
            GamePhase::Relaxed => Transition(State::relaxed()),
        }
    }

    fn stop(&mut self) {
        self.release_at_ms = None;
        self.phase = None;
        self.stopped = true;
    }

    fn detect_movement(&mut self, score: f32, now_ms: u64, context: &mut DispatchContext) {
        if self.release_at_ms.is_some() || score <= self.config.person_confidence_min {
            return;
        }

        let assessment = self.detector.assess(&self.history, &self.detection, now_ms);
        if !assessment.confirmed() {
            return;
        }

        self.detection.record(now_ms);
        self.release_at_ms = Some(now_ms.saturating_add(self.config.elimination_delay_ms));
        context.command = Some(Command::Activate);
        context.detection = Some(assessment);
    }

    fn fire_due_release(&mut self, now_ms: u64, context: &mut DispatchContext) {
        let Some(release_at_ms) = self.release_at_ms else {
            return;
        };
        if now_ms < release_at_ms {
            return;
        }
        self.release_at_ms = None;
        if matches!(self.phase, Some(GamePhase::Armed)) {
            context.command = Some(Command::Deactivate);
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl GameMachine {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GameEvent) -> Outcome<State> {
        match event {
            GameEvent::Start => {
                let phase = self.config.initial_phase;
                self.enter_phase(phase, context)
            }
            GameEvent::Shutdown => {
                self.stop();
                Transition(State::stopped())
            }
            _ => Handled,
        }
    }

    #[state]
    fn armed(&mut self, context: &mut DispatchContext, event: &GameEvent) -> Outcome<State> {
        match *event {
            GameEvent::Score { score, now_ms } => {
                self.history.push(score);
                self.detect_movement(score, now_ms, context);
                Handled
            }
            GameEvent::DeferredDue { now_ms } => {
                self.fire_due_release(now_ms, context);
                Handled
            }
            GameEvent::CycleTick => {
                if self.cycle.advance() {
                    return self.toggle_phase(context);
                }
                Handled
            }
            GameEvent::Shutdown => {
                self.stop();
                Transition(State::stopped())
            }
            GameEvent::Start | GameEvent::MissingSample => Handled,
        }
    }

    #[state]
    fn relaxed(&mut self, context: &mut DispatchContext, event: &GameEvent) -> Outcome<State> {
        match *event {
            GameEvent::Score { score, .. } => {
                self.history.push(score);
                Handled
            }
            GameEvent::DeferredDue { now_ms } => {
                self.fire_due_release(now_ms, context);
                Handled
            }
            GameEvent::CycleTick => {
                if self.cycle.advance() {
                    return self.toggle_phase(context);
                }
                Handled
            }
            GameEvent::Shutdown => {
                self.stop();
                Transition(State::stopped())
            }
            GameEvent::Start | GameEvent::MissingSample => Handled,
        }
    }

    #[state]
    fn stopped() -> Outcome<State> {
        Handled
    }
}
