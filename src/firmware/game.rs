use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};
use redlight::{
    feed::ChannelScoreSource,
    link::{drain_delivery_reports, QueuedTransport},
    GameEngine, GameLoop,
};

use super::config::{DELIVERY_REPORTS, GAME_STOP, OUTBOUND, SCORE_SAMPLES, TELEMETRY};

#[embassy_executor::task]
pub(crate) async fn game_task(engine: GameEngine) {
    let poll_period_ms = engine.config().poll_period_ms;
    let mut game = GameLoop::new(
        engine,
        ChannelScoreSource::new(&SCORE_SAMPLES),
        QueuedTransport::new(&OUTBOUND),
        &TELEMETRY,
    );

    let _ = game.start();

    let mut ticker = Ticker::every(Duration::from_millis(poll_period_ms));
    loop {
        match select(ticker.next(), GAME_STOP.receive()).await {
            Either::First(()) => {
                let _ = game.poll(Instant::now().as_millis());
                drain_delivery_reports(&DELIVERY_REPORTS, &TELEMETRY);
            }
            Either::Second(()) => {
                game.shutdown();
                log::info!("game stopped: {}", TELEMETRY.snapshot());
                return;
            }
        }
    }
}
