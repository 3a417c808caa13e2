mod config;
mod feed;
mod game;
mod radio;

use embassy_time::{Duration, Ticker};
use esp_hal::{
    timer::timg::TimerGroup,
    uart::{Config as UartConfig, Uart},
};
use esp_rtos::embassy::Executor;
use redlight::{GameConfig, GameEngine};
use static_cell::StaticCell;

use self::config::{RADIO_HEAP_BYTES, TELEMETRY, TELEMETRY_INTERVAL_MS, UART_BAUD};

pub(crate) fn run() -> ! {
    esp_println::logger::init_logger(log::LevelFilter::Info);
    let peripherals = esp_hal::init(esp_hal::Config::default());
    esp_alloc::heap_allocator!(size: RADIO_HEAP_BYTES);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let uart_cfg = UartConfig::default().with_baudrate(UART_BAUD);
    let uart = match Uart::new(peripherals.UART0, uart_cfg) {
        Ok(uart) => uart
            .with_rx(peripherals.GPIO3)
            .with_tx(peripherals.GPIO1)
            .into_async(),
        Err(err) => {
            log::error!("boot: UART0 init err={:?}", err);
            halt_forever();
        }
    };

    let engine = match GameEngine::new(GameConfig::default()) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("boot: {}", err);
            halt_forever();
        }
    };

    let link = match radio::setup(peripherals.WIFI) {
        Ok(link) => link,
        Err(reason) => {
            log::error!("boot: {}", reason);
            halt_forever();
        }
    };

    esp_println::println!("redlight: sender up");

    static EXECUTOR: StaticCell<Executor> = StaticCell::new();
    let executor = EXECUTOR.init(Executor::new());
    executor.run(move |spawner| {
        spawner.must_spawn(radio::radio_task(link));
        spawner.must_spawn(feed::score_feed_task(uart));
        spawner.must_spawn(game::game_task(engine));
        spawner.must_spawn(telemetry_task());
    });
}

#[embassy_executor::task]
async fn telemetry_task() {
    let mut ticker = Ticker::every(Duration::from_millis(TELEMETRY_INTERVAL_MS));
    loop {
        ticker.next().await;
        log::info!("telemetry {}", TELEMETRY.snapshot());
    }
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
