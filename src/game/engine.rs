use statig::blocking::IntoStateMachineExt as _;

use crate::config::{ConfigError, GameConfig};

use super::detector::MovementAssessment;
use super::history::ScoreHistory;
use super::machine::{DispatchContext, GameMachine};
use super::types::{Command, GameEvent, GamePhase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    /// `None` before `start` and after `shutdown`.
    pub phase: Option<GamePhase>,
    pub cycle_ticks: u32,
    pub last_detection_ms: Option<u64>,
    pub release_at_ms: Option<u64>,
    pub stopped: bool,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct GameApplyResult {
    pub(crate) before: GameSnapshot,
    pub(crate) after: GameSnapshot,
    pub(crate) command: Option<Command>,
    pub(crate) detection: Option<MovementAssessment>,
}

impl GameApplyResult {
    pub(crate) fn phase_changed(&self) -> bool {
        self.before.phase != self.after.phase
    }
}

/// Owns all game state and turns scores and ticks into actuator commands.
///
/// A new engine is idle: scores and cycle ticks are dropped (with a warning)
/// until `start` enters the initial phase.
///
/// Call order per poll is `poll_deferred`, then `on_score` (or
/// `on_missing_sample`), then `tick_cycle`.
pub struct GameEngine {
    machine: statig::blocking::StateMachine<GameMachine>,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            machine: GameMachine::new(config).state_machine(),
        })
    }

    /// Enters the configured initial phase and returns the command announcing it.
    pub fn start(&mut self) -> Option<Command> {
        let result = self.apply(GameEvent::Start);
        if let Some(phase) = result.after.phase {
            log::info!("game started: {} light", phase.as_str());
        }
        result.command
    }

    pub fn on_score(&mut self, score: f32, now_ms: u64) -> Option<Command> {
        if !score.is_finite() {
            log::warn!("discarding non-finite person score");
            self.on_missing_sample();
            return None;
        }
        self.warn_if_idle("person score");
        let score = score.clamp(0.0, 1.0);
        let result = self.apply(GameEvent::Score { score, now_ms });
        log::debug!(
            "person score {:.2} light={}",
            score,
            result.after.phase.map_or("-", GamePhase::as_str)
        );
        if let Some(assessment) = result.detection {
            log::info!(
                "movement detected avg_change={:.3} pairs={}",
                assessment.avg_change,
                assessment.valid_pairs
            );
        }
        result.command
    }

    pub fn on_missing_sample(&mut self) {
        let _ = self.apply(GameEvent::MissingSample);
    }

    pub fn tick_cycle(&mut self) -> Option<Command> {
        self.warn_if_idle("cycle tick");
        let result = self.apply(GameEvent::CycleTick);
        if result.phase_changed() {
            if let Some(phase) = result.after.phase {
                log::info!("light changed to {}", phase.as_str());
            }
        }
        result.command
    }

    /// Fires the delayed release once its deadline has passed.
    ///
    /// Yields `Deactivate` only if the game is still in red light at fire time.
    pub fn poll_deferred(&mut self, now_ms: u64) -> Option<Command> {
        let result = self.apply(GameEvent::DeferredDue { now_ms });
        if result.before.release_at_ms.is_some() && result.after.release_at_ms.is_none() {
            match result.command {
                Some(command) => log::debug!("elimination released with {}", command.as_str()),
                None => log::debug!("elimination release suppressed"),
            }
        }
        result.command
    }

    /// Drops any pending release and stops reacting to further input.
    pub fn shutdown(&mut self) {
        let result = self.apply(GameEvent::Shutdown);
        if result.before.release_at_ms.is_some() {
            log::info!("game shut down, pending release cancelled");
        } else {
            log::info!("game shut down");
        }
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.machine.inner().phase
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.machine.inner().history
    }

    pub fn config(&self) -> &GameConfig {
        &self.machine.inner().config
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let inner = self.machine.inner();
        GameSnapshot {
            phase: inner.phase,
            cycle_ticks: inner.cycle.ticks(),
            last_detection_ms: inner.detection.last_detection_ms(),
            release_at_ms: inner.release_at_ms,
            stopped: inner.stopped,
        }
    }

    fn warn_if_idle(&self, input: &str) {
        let inner = self.machine.inner();
        if inner.phase.is_none() && !inner.stopped {
            log::warn!("{} dropped: game not started", input);
        }
    }

    fn apply(&mut self, event: GameEvent) -> GameApplyResult {
        let before = self.snapshot();
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        let after = self.snapshot();
        debug_assert!(context.entered.is_none() || context.entered == after.phase);
        GameApplyResult {
            before,
            after,
            command: context.command,
            detection: context.detection,
        }
    }
}
