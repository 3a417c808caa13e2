use esp_hal::{uart::Uart, Async};
use redlight::feed::{FeedEvent, ScoreError, ScoreLine, ScoreLineReader, ScoreSample};

use super::config::{GAME_STOP, SCORE_SAMPLES, TELEMETRY};

pub(crate) type SerialUart = Uart<'static, Async>;

#[embassy_executor::task]
pub(crate) async fn score_feed_task(mut uart: SerialUart) {
    let mut reader = ScoreLineReader::new();
    let mut rx = [0u8; 1];

    loop {
        match uart.read_async(&mut rx).await {
            Ok(1) => {}
            Ok(_) => continue,
            Err(err) => {
                log::warn!("score feed: uart read err={:?}", err);
                continue;
            }
        }

        match reader.push_byte(rx[0]) {
            FeedEvent::Pending => {}
            FeedEvent::Line(ScoreLine::Score(score)) => queue_sample(Ok(score)),
            FeedEvent::Line(ScoreLine::NoSample) => {
                queue_sample(Err(ScoreError::InferenceFailed))
            }
            FeedEvent::Line(ScoreLine::Stop) => {
                let _ = GAME_STOP.try_send(());
            }
            FeedEvent::Unrecognized => {
                TELEMETRY.record_feed_reject();
                log::warn!("score feed: unrecognized line");
            }
            FeedEvent::Overflow => {
                TELEMETRY.record_feed_reject();
                log::warn!("score feed: line too long");
            }
        }
    }
}

// The game only consumes the newest sample; make room rather than block.
fn queue_sample(sample: ScoreSample) {
    if SCORE_SAMPLES.try_send(sample).is_err() {
        let _ = SCORE_SAMPLES.try_receive();
        let _ = SCORE_SAMPLES.try_send(sample);
    }
}
