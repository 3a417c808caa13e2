use super::quantized_person_score;

/// One line of the serial score feed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScoreLine {
    /// `SCORE <float>` or `Q <int8>`.
    Score(f32),
    /// `NONE`: the inference host had no usable frame.
    NoSample,
    /// `STOP`: end the game.
    Stop,
}

pub fn parse_score_line(line: &[u8]) -> Option<ScoreLine> {
    let line = line.trim_ascii();
    let (command, argument) = split_command(line);

    if command.eq_ignore_ascii_case(b"SCORE") {
        let score = parse_ascii::<f32>(argument?)?;
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return None;
        }
        return Some(ScoreLine::Score(score));
    }
    if command.eq_ignore_ascii_case(b"Q") {
        let raw = parse_ascii::<i8>(argument?)?;
        return Some(ScoreLine::Score(quantized_person_score(raw)));
    }
    if argument.is_some() {
        return None;
    }
    if command.eq_ignore_ascii_case(b"NONE") {
        return Some(ScoreLine::NoSample);
    }
    if command.eq_ignore_ascii_case(b"STOP") {
        return Some(ScoreLine::Stop);
    }
    None
}

fn split_command(line: &[u8]) -> (&[u8], Option<&[u8]>) {
    match line.iter().position(u8::is_ascii_whitespace) {
        Some(idx) => (&line[..idx], Some(line[idx..].trim_ascii())),
        None => (line, None),
    }
}

fn parse_ascii<T: core::str::FromStr>(token: &[u8]) -> Option<T> {
    core::str::from_utf8(token).ok()?.parse().ok()
}
