use core::fmt;

use crate::game::GamePhase;

pub const POLL_PERIOD_MS: u64 = 100;
pub const CYCLE_TOGGLE_TICKS: u32 = 50;
pub const MOVEMENT_THRESHOLD: f32 = 0.2;
pub const PERSON_CONFIDENCE_MIN: f32 = 0.5;
pub const VALIDITY_FLOOR: f32 = 0.1;
pub const DETECTION_COOLDOWN_MS: u64 = 500;
pub const ELIMINATION_DELAY_MS: u64 = 1_500;
pub const SCORE_HISTORY_LEN: usize = 5;
/// Compile-time capacity of the score ring; `history_len` may not exceed it.
pub const SCORE_HISTORY_MAX: usize = 16;
pub const SCORE_SENTINEL: f32 = 0.0;
pub const LINK_PAYLOAD_MAX: usize = 8;
pub const SCORE_LINE_MAX: usize = 32;

/// Tunables for one game engine instance.
///
/// Defaults reproduce the reference game: a 100 ms poll, a phase toggle every
/// 50 polls, a five-sample history and a 1.5 s elimination buzzer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub poll_period_ms: u64,
    pub cycle_toggle_ticks: u32,
    pub movement_threshold: f32,
    pub person_confidence_min: f32,
    pub validity_floor: f32,
    pub cooldown_ms: u64,
    pub elimination_delay_ms: u64,
    pub history_len: usize,
    pub initial_phase: GamePhase,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::default_const()
    }
}

impl GameConfig {
    pub const fn default_const() -> Self {
        Self {
            poll_period_ms: POLL_PERIOD_MS,
            cycle_toggle_ticks: CYCLE_TOGGLE_TICKS,
            movement_threshold: MOVEMENT_THRESHOLD,
            person_confidence_min: PERSON_CONFIDENCE_MIN,
            validity_floor: VALIDITY_FLOOR,
            cooldown_ms: DETECTION_COOLDOWN_MS,
            elimination_delay_ms: ELIMINATION_DELAY_MS,
            history_len: SCORE_HISTORY_LEN,
            initial_phase: GamePhase::Armed,
        }
    }

    pub const fn with_poll_period_ms(mut self, poll_period_ms: u64) -> Self {
        self.poll_period_ms = poll_period_ms;
        self
    }

    pub const fn with_cycle_toggle_ticks(mut self, ticks: u32) -> Self {
        self.cycle_toggle_ticks = ticks;
        self
    }

    pub const fn with_movement_threshold(mut self, threshold: f32) -> Self {
        self.movement_threshold = threshold;
        self
    }

    pub const fn with_person_confidence_min(mut self, min: f32) -> Self {
        self.person_confidence_min = min;
        self
    }

    pub const fn with_validity_floor(mut self, floor: f32) -> Self {
        self.validity_floor = floor;
        self
    }

    pub const fn with_cooldown_ms(mut self, cooldown_ms: u64) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    pub const fn with_elimination_delay_ms(mut self, delay_ms: u64) -> Self {
        self.elimination_delay_ms = delay_ms;
        self
    }

    pub const fn with_history_len(mut self, len: usize) -> Self {
        self.history_len = len;
        self
    }

    pub const fn with_initial_phase(mut self, phase: GamePhase) -> Self {
        self.initial_phase = phase;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_period_ms == 0 {
            return Err(ConfigError::ZeroPollPeriod);
        }
        if self.cycle_toggle_ticks == 0 {
            return Err(ConfigError::ZeroCycleThreshold);
        }
        if !(2..=SCORE_HISTORY_MAX).contains(&self.history_len) {
            return Err(ConfigError::HistoryLen(self.history_len));
        }
        for (name, value) in [
            ("movement_threshold", self.movement_threshold),
            ("person_confidence_min", self.person_confidence_min),
            ("validity_floor", self.validity_floor),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange(name));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroPollPeriod,
    ZeroCycleThreshold,
    HistoryLen(usize),
    OutOfUnitRange(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPollPeriod => f.write_str("poll period must be non-zero"),
            Self::ZeroCycleThreshold => f.write_str("cycle toggle threshold must be non-zero"),
            Self::HistoryLen(len) => write!(
                f,
                "history length {len} outside 2..={SCORE_HISTORY_MAX}"
            ),
            Self::OutOfUnitRange(name) => write!(f, "{name} must lie within [0, 1]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_game() {
        let config = GameConfig::default();
        assert_eq!(config.poll_period_ms, 100);
        assert_eq!(config.cycle_toggle_ticks, 50);
        assert_eq!(config.cooldown_ms, 500);
        assert_eq!(config.elimination_delay_ms, 1_500);
        assert_eq!(config.history_len, 5);
        assert_eq!(config.initial_phase, GamePhase::Armed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_history_outside_capacity() {
        let short = GameConfig::default().with_history_len(1);
        assert_eq!(short.validate(), Err(ConfigError::HistoryLen(1)));

        let long = GameConfig::default().with_history_len(SCORE_HISTORY_MAX + 1);
        assert_eq!(
            long.validate(),
            Err(ConfigError::HistoryLen(SCORE_HISTORY_MAX + 1))
        );
    }

    #[test]
    fn rejects_thresholds_outside_unit_range() {
        let config = GameConfig::default().with_movement_threshold(f32::NAN);
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange("movement_threshold"))
        );

        let config = GameConfig::default().with_validity_floor(-0.1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange("validity_floor"))
        );
    }

    #[test]
    fn rejects_zero_periods() {
        assert_eq!(
            GameConfig::default().with_cycle_toggle_ticks(0).validate(),
            Err(ConfigError::ZeroCycleThreshold)
        );
        assert_eq!(
            GameConfig::default().with_poll_period_ms(0).validate(),
            Err(ConfigError::ZeroPollPeriod)
        );
    }
}
