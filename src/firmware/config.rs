use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use redlight::{
    feed::ScoreSample,
    link::{parse_peer_mac, DeliveryReport, LinkPayload, DEFAULT_PEER_MAC},
    telemetry::Telemetry,
};

pub(crate) const UART_BAUD: u32 = 115_200;
pub(crate) const RADIO_HEAP_BYTES: usize = 72 * 1024;
pub(crate) const TELEMETRY_INTERVAL_MS: u64 = 30_000;

pub(crate) const SCORE_QUEUE_LEN: usize = 4;
pub(crate) const OUTBOUND_QUEUE_LEN: usize = 4;
pub(crate) const DELIVERY_QUEUE_LEN: usize = 8;

pub(crate) const PEER_MAC: [u8; 6] = match option_env!("REDLIGHT_PEER_MAC") {
    Some(text) => match parse_peer_mac(text) {
        Some(mac) => mac,
        None => panic!("REDLIGHT_PEER_MAC must look like aa:bb:cc:dd:ee:ff"),
    },
    None => DEFAULT_PEER_MAC,
};

pub(crate) static SCORE_SAMPLES: Channel<CriticalSectionRawMutex, ScoreSample, SCORE_QUEUE_LEN> =
    Channel::new();
pub(crate) static OUTBOUND: Channel<CriticalSectionRawMutex, LinkPayload, OUTBOUND_QUEUE_LEN> =
    Channel::new();
pub(crate) static DELIVERY_REPORTS: Channel<
    CriticalSectionRawMutex,
    DeliveryReport,
    DELIVERY_QUEUE_LEN,
> = Channel::new();
pub(crate) static GAME_STOP: Channel<CriticalSectionRawMutex, (), 1> = Channel::new();
pub(crate) static TELEMETRY: Telemetry = Telemetry::new();
