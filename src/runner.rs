use heapless::Vec;

use crate::feed::{ScoreError, ScoreSource};
use crate::game::{Command, GameEngine};
use crate::link::{CommandDispatcher, DispatchOutcome, Transport};
use crate::telemetry::Telemetry;

/// What one poll iteration did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PollReport {
    pub commands: Vec<(Command, DispatchOutcome), 3>,
    pub missing: Option<ScoreError>,
}

/// One cooperative poll loop: release check, one score, one cycle tick.
pub struct GameLoop<'a, S: ScoreSource, T: Transport> {
    engine: GameEngine,
    source: S,
    dispatcher: CommandDispatcher<'a, T>,
    telemetry: &'a Telemetry,
}

impl<'a, S: ScoreSource, T: Transport> GameLoop<'a, S, T> {
    pub fn new(engine: GameEngine, source: S, transport: T, telemetry: &'a Telemetry) -> Self {
        Self {
            engine,
            source,
            dispatcher: CommandDispatcher::new(transport, telemetry),
            telemetry,
        }
    }

    pub fn start(&mut self) -> Option<DispatchOutcome> {
        let command = self.engine.start()?;
        Some(self.dispatcher.dispatch(command))
    }

    pub fn poll(&mut self, now_ms: u64) -> PollReport {
        let mut report = PollReport::default();

        if let Some(command) = self.engine.poll_deferred(now_ms) {
            self.send(command, &mut report);
        }

        match self.source.person_score() {
            Ok(score) => {
                self.telemetry.record_score();
                let last_detection = self.engine.snapshot().last_detection_ms;
                if let Some(command) = self.engine.on_score(score, now_ms) {
                    self.send(command, &mut report);
                }
                if self.engine.snapshot().last_detection_ms != last_detection {
                    self.telemetry.record_detection();
                }
            }
            Err(err) => {
                self.telemetry.record_missing_sample();
                if !matches!(err, ScoreError::NotReady) {
                    log::warn!("no person score this tick: {}", err);
                }
                self.engine.on_missing_sample();
                report.missing = Some(err);
            }
        }

        let phase = self.engine.phase();
        if let Some(command) = self.engine.tick_cycle() {
            self.send(command, &mut report);
        }
        if self.engine.phase() != phase {
            self.telemetry.record_phase_toggle();
        }

        report
    }

    /// Cancels any pending release; later polls do nothing.
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    fn send(&mut self, command: Command, report: &mut PollReport) {
        let outcome = self.dispatcher.dispatch(command);
        // At most release + detection/toggle per poll; capacity is 3.
        let _ = report.commands.push((command, outcome));
    }
}
