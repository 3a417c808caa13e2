use heapless::Vec;

use crate::config::{SCORE_HISTORY_MAX, SCORE_SENTINEL};

/// Ring of the most recent person-confidence scores.
///
/// Always holds exactly `len` slots; unused slots carry the sentinel `0.0`,
/// which sits below any sensible validity floor and so never contributes to
/// movement averaging.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreHistory {
    slots: Vec<f32, SCORE_HISTORY_MAX>,
    cursor: usize,
}

impl ScoreHistory {
    /// Panics if `len` is outside `1..=SCORE_HISTORY_MAX`; callers validate
    /// lengths through `GameConfig::validate` first.
    pub fn new(len: usize) -> Self {
        assert!(
            (1..=SCORE_HISTORY_MAX).contains(&len),
            "score history length out of range"
        );
        let mut slots = Vec::new();
        // Cannot fail: len <= capacity.
        let _ = slots.resize(len, SCORE_SENTINEL);
        Self { slots, cursor: 0 }
    }

    /// Number of slots; fixed for the life of the history.
    pub fn window_len(&self) -> usize {
        self.slots.len()
    }

    pub fn push(&mut self, score: f32) {
        debug_assert!(self.cursor < self.slots.len());
        self.slots[self.cursor] = score;
        self.cursor = (self.cursor + 1) % self.slots.len();
    }

    pub fn reset(&mut self) {
        self.slots.fill(SCORE_SENTINEL);
    }

    /// Most recently pushed score, or the sentinel after a reset.
    pub fn latest(&self) -> f32 {
        let len = self.slots.len();
        self.slots[(self.cursor + len - 1) % len]
    }

    /// The `len - 1` time-adjacent `(older, newer)` pairs, newest pair first.
    pub fn pairs(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        let len = self.slots.len();
        (1..len).map(move |step| {
            let newer = (self.cursor + len - step) % len;
            let older = (self.cursor + 2 * len - step - 1) % len;
            (self.slots[older], self.slots[newer])
        })
    }

    /// Pairs whose both ends are strictly above `floor`.
    pub fn valid_pairs(&self, floor: f32) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.pairs()
            .filter(move |&(older, newer)| older > floor && newer > floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(scores: &[f32]) -> ScoreHistory {
        let mut history = ScoreHistory::new(5);
        for &score in scores {
            history.push(score);
        }
        history
    }

    #[test]
    fn starts_with_sentinels() {
        let history = ScoreHistory::new(5);
        assert_eq!(history.window_len(), 5);
        assert_eq!(history.pairs().count(), 4);
        assert!(history.pairs().all(|(a, b)| a == 0.0 && b == 0.0));
        assert_eq!(history.valid_pairs(0.1).count(), 0);
    }

    #[test]
    fn pairs_walk_backward_from_cursor() {
        let history = filled(&[0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);
        // 0.7 overwrote 0.2; ring is [0.7, 0.3, 0.4, 0.5, 0.6], cursor at 1.
        let pairs: std::vec::Vec<_> = history.pairs().collect();
        assert_eq!(pairs, std::vec![(0.6, 0.7), (0.5, 0.6), (0.4, 0.5), (0.3, 0.4)]);
        assert_eq!(history.latest(), 0.7);
    }

    #[test]
    fn always_exposes_len_minus_one_pairs() {
        let sweep = [0.0, 0.1, 0.11, 0.9, 0.05, 0.1, 0.5, 0.11, 0.0, 1.0, 0.2];
        let mut history = ScoreHistory::new(5);
        for step in 0..40 {
            history.push(sweep[step % sweep.len()]);
            assert_eq!(history.pairs().count(), 4);
            assert!(history.valid_pairs(0.1).all(|(a, b)| a > 0.1 && b > 0.1));
        }
    }

    #[test]
    fn valid_pairs_never_touch_floor() {
        let history = filled(&[0.05, 0.9, 0.1, 0.8, 0.7]);
        let valid: std::vec::Vec<_> = history.valid_pairs(0.1).collect();
        assert_eq!(valid, std::vec![(0.8, 0.7)]);
        assert!(valid.iter().all(|&(a, b)| a >= 0.1 && b >= 0.1));
    }

    #[test]
    fn reset_clears_every_slot() {
        let mut history = filled(&[0.9, 0.8, 0.7]);
        history.reset();
        assert!(history.pairs().all(|(a, b)| a == 0.0 && b == 0.0));
        assert_eq!(history.latest(), 0.0);
    }
}
