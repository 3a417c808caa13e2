use heapless::Vec;

use crate::config::SCORE_LINE_MAX;

use super::parser::{parse_score_line, ScoreLine};

/// Result of feeding one byte of the serial score feed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeedEvent {
    /// Mid-line, blank line, or the tail of a discarded line.
    Pending,
    Line(ScoreLine),
    /// A terminated line that is not part of the protocol.
    Unrecognized,
    /// The line outgrew `SCORE_LINE_MAX`; the rest of it is dropped.
    Overflow,
}

/// Turns the CR/LF framed score feed into protocol lines, one byte at a time.
pub struct ScoreLineReader {
    line: Vec<u8, SCORE_LINE_MAX>,
    discarding: bool,
}

impl Default for ScoreLineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreLineReader {
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            discarding: false,
        }
    }

    pub fn push_byte(&mut self, byte: u8) -> FeedEvent {
        if matches!(byte, b'\r' | b'\n') {
            return self.finish_line();
        }
        if self.discarding {
            return FeedEvent::Pending;
        }
        if self.line.push(byte).is_err() {
            self.line.clear();
            self.discarding = true;
            return FeedEvent::Overflow;
        }
        FeedEvent::Pending
    }

    fn finish_line(&mut self) -> FeedEvent {
        if core::mem::take(&mut self.discarding) || self.line.is_empty() {
            return FeedEvent::Pending;
        }
        let event = match parse_score_line(&self.line) {
            Some(line) => FeedEvent::Line(line),
            None => FeedEvent::Unrecognized,
        };
        self.line.clear();
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(reader: &mut ScoreLineReader, bytes: &[u8]) -> std::vec::Vec<FeedEvent> {
        bytes
            .iter()
            .map(|&byte| reader.push_byte(byte))
            .filter(|event| *event != FeedEvent::Pending)
            .collect()
    }

    #[test]
    fn crlf_score_line_yields_one_event() {
        let mut reader = ScoreLineReader::new();
        assert_eq!(
            feed(&mut reader, b"SCORE 0.75\r\n"),
            std::vec![FeedEvent::Line(ScoreLine::Score(0.75))]
        );
    }

    #[test]
    fn overflow_is_reported_once_and_next_line_is_clean() {
        let mut reader = ScoreLineReader::new();
        let mut stream = std::vec::Vec::from(&b"SCORE 0.5\r\n"[..]);
        stream.extend(core::iter::repeat(b'7').take(SCORE_LINE_MAX + 10));
        stream.extend_from_slice(b"\r\nQ -5\n");

        assert_eq!(
            feed(&mut reader, &stream),
            std::vec![
                FeedEvent::Line(ScoreLine::Score(0.5)),
                FeedEvent::Overflow,
                FeedEvent::Line(ScoreLine::Score(123.0 / 255.0)),
            ]
        );
    }

    #[test]
    fn line_of_exactly_max_bytes_is_kept() {
        let mut reader = ScoreLineReader::new();
        let mut stream = std::vec::Vec::from(&b"SCORE 0.25"[..]);
        stream.resize(SCORE_LINE_MAX, b' ');
        stream.push(b'\n');
        assert_eq!(
            feed(&mut reader, &stream),
            std::vec![FeedEvent::Line(ScoreLine::Score(0.25))]
        );
    }

    #[test]
    fn control_and_unknown_lines() {
        let mut reader = ScoreLineReader::new();
        assert_eq!(
            feed(&mut reader, b"NONE\nhello\n\n\rSTOP\r"),
            std::vec![
                FeedEvent::Line(ScoreLine::NoSample),
                FeedEvent::Unrecognized,
                FeedEvent::Line(ScoreLine::Stop),
            ]
        );
    }
}
