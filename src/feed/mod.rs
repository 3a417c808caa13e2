//! Person-confidence input: the score source seam, the int8 model output
//! conversion and the serial line protocol used to receive scores from an
//! external inference host.

mod line_reader;
mod parser;

use core::fmt;

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel};

pub use line_reader::{FeedEvent, ScoreLineReader};
pub use parser::{parse_score_line, ScoreLine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreError {
    /// The camera returned no frame.
    NoFrame,
    /// The model ran but produced no usable output.
    InferenceFailed,
    /// Nothing arrived since the previous poll.
    NotReady,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoFrame => "camera capture failed",
            Self::InferenceFailed => "inference failed",
            Self::NotReady => "no score available",
        })
    }
}

pub type ScoreSample = Result<f32, ScoreError>;

/// Produces at most one person-confidence score per poll.
pub trait ScoreSource {
    fn person_score(&mut self) -> ScoreSample;
}

/// Maps the int8 "person" logit of the quantized detector onto [0, 1].
pub fn quantized_person_score(raw: i8) -> f32 {
    (raw as i32 + 128) as f32 / 255.0
}

/// Reads samples queued by another task, keeping only the newest.
pub struct ChannelScoreSource<'a, M: RawMutex, const N: usize> {
    samples: &'a Channel<M, ScoreSample, N>,
}

impl<'a, M: RawMutex, const N: usize> ChannelScoreSource<'a, M, N> {
    pub const fn new(samples: &'a Channel<M, ScoreSample, N>) -> Self {
        Self { samples }
    }
}

impl<M: RawMutex, const N: usize> ScoreSource for ChannelScoreSource<'_, M, N> {
    fn person_score(&mut self) -> ScoreSample {
        let mut latest = Err(ScoreError::NotReady);
        while let Ok(sample) = self.samples.try_receive() {
            latest = sample;
        }
        latest
    }
}

impl<F> ScoreSource for F
where
    F: FnMut() -> ScoreSample,
{
    fn person_score(&mut self) -> ScoreSample {
        self()
    }
}

#[cfg(test)]
mod tests {
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    use super::*;

    #[test]
    fn quantized_extremes_map_to_unit_range() {
        assert_eq!(quantized_person_score(i8::MIN), 0.0);
        assert_eq!(quantized_person_score(i8::MAX), 1.0);
        assert!((quantized_person_score(0) - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn channel_source_keeps_latest_sample() {
        let samples: Channel<NoopRawMutex, ScoreSample, 4> = Channel::new();
        let mut source = ChannelScoreSource::new(&samples);
        assert_eq!(source.person_score(), Err(ScoreError::NotReady));

        let _ = samples.try_send(Ok(0.2));
        let _ = samples.try_send(Ok(0.7));
        assert_eq!(source.person_score(), Ok(0.7));
        assert_eq!(source.person_score(), Err(ScoreError::NotReady));

        let _ = samples.try_send(Ok(0.4));
        let _ = samples.try_send(Err(ScoreError::InferenceFailed));
        assert_eq!(source.person_score(), Err(ScoreError::InferenceFailed));
    }

    #[test]
    fn closures_are_sources() {
        let mut scores = [0.3f32, 0.6].into_iter();
        let mut source = move || scores.next().ok_or(ScoreError::NoFrame);
        assert_eq!(source.person_score(), Ok(0.3));
        assert_eq!(source.person_score(), Ok(0.6));
        assert_eq!(source.person_score(), Err(ScoreError::NoFrame));
    }
}
