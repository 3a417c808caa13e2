use crate::config::GameConfig;

use super::history::ScoreHistory;

/// When the last movement was confirmed, and how long to stay quiet after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectionState {
    last_detection_ms: Option<u64>,
    cooldown_ms: u64,
}

impl DetectionState {
    pub const fn new(cooldown_ms: u64) -> Self {
        Self {
            last_detection_ms: None,
            cooldown_ms,
        }
    }

    pub const fn last_detection_ms(&self) -> Option<u64> {
        self.last_detection_ms
    }

    pub fn cooldown_passed(&self, now_ms: u64) -> bool {
        match self.last_detection_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.cooldown_ms,
        }
    }

    pub fn record(&mut self, now_ms: u64) {
        debug_assert!(self.cooldown_passed(now_ms));
        self.last_detection_ms = Some(now_ms);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementAssessment {
    pub avg_change: f32,
    pub valid_pairs: usize,
    pub over_threshold: bool,
    pub cooldown_passed: bool,
}

impl MovementAssessment {
    pub const fn confirmed(&self) -> bool {
        self.over_threshold && self.cooldown_passed
    }
}

/// Smooths frame-to-frame confidence deltas and debounces with a cooldown.
///
/// A single confidence spike is not trusted; the mean absolute delta over the
/// valid pairs of the whole window has to exceed the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementDetector {
    movement_threshold: f32,
    validity_floor: f32,
}

impl MovementDetector {
    pub const fn new(movement_threshold: f32, validity_floor: f32) -> Self {
        Self {
            movement_threshold,
            validity_floor,
        }
    }

    pub const fn from_config(config: &GameConfig) -> Self {
        Self::new(config.movement_threshold, config.validity_floor)
    }

    pub fn evaluate(&self, history: &ScoreHistory, state: &DetectionState, now_ms: u64) -> bool {
        self.assess(history, state, now_ms).confirmed()
    }

    pub fn assess(
        &self,
        history: &ScoreHistory,
        state: &DetectionState,
        now_ms: u64,
    ) -> MovementAssessment {
        let (total, valid_pairs) = history
            .valid_pairs(self.validity_floor)
            .fold((0.0f32, 0usize), |(total, count), (older, newer)| {
                (total + (newer - older).abs(), count + 1)
            });
        let avg_change = if valid_pairs > 0 {
            total / valid_pairs as f32
        } else {
            0.0
        };

        MovementAssessment {
            avg_change,
            valid_pairs,
            over_threshold: avg_change > self.movement_threshold,
            cooldown_passed: state.cooldown_passed(now_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(scores: &[f32]) -> ScoreHistory {
        let mut history = ScoreHistory::new(5);
        for &score in scores {
            history.push(score);
        }
        history
    }

    fn detector() -> MovementDetector {
        MovementDetector::from_config(&GameConfig::default())
    }

    #[test]
    fn steady_scores_are_not_movement() {
        let history = history_of(&[0.9, 0.9, 0.9, 0.9, 0.9]);
        let assessment = detector().assess(&history, &DetectionState::new(500), 10_000);
        assert_eq!(assessment.valid_pairs, 4);
        assert_eq!(assessment.avg_change, 0.0);
        assert!(!assessment.confirmed());
    }

    #[test]
    fn alternating_absent_frames_are_filtered_out() {
        let history = history_of(&[0.0, 0.9, 0.0, 0.9, 0.0]);
        let assessment = detector().assess(&history, &DetectionState::new(500), 10_000);
        assert_eq!(assessment.valid_pairs, 0);
        assert_eq!(assessment.avg_change, 0.0);
        assert!(!detector().evaluate(&history, &DetectionState::new(500), 10_000));
    }

    #[test]
    fn oscillating_confidence_is_movement() {
        let history = history_of(&[0.6, 0.9, 0.6, 0.9]);
        let assessment = detector().assess(&history, &DetectionState::new(500), 10_000);
        assert_eq!(assessment.valid_pairs, 3);
        assert!((assessment.avg_change - 0.3).abs() < 1e-5);
        assert!(assessment.confirmed());
    }

    #[test]
    fn cooldown_is_absolute() {
        let history = history_of(&[0.1, 0.9, 0.2, 0.95, 0.15]);
        let mut state = DetectionState::new(500);
        state.record(1_000);

        for now_ms in [1_000, 1_250, 1_499, 1_500] {
            assert!(!detector().evaluate(&history, &state, now_ms));
        }
        assert!(detector().evaluate(&history, &state, 1_501));
    }

    #[test]
    fn change_equal_to_threshold_does_not_trigger() {
        let history = history_of(&[0.5, 0.75, 0.5, 0.75, 0.5]);
        let detector = MovementDetector::new(0.25, 0.1);
        assert!(!detector.evaluate(&history, &DetectionState::new(500), 10_000));
    }
}
