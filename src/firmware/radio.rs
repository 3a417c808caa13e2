use esp_radio::{
    esp_now::{EspNow, EspNowWifiInterface, PeerInfo},
    wifi::{ClientConfig, ModeConfig, WifiController},
};
use redlight::link::{publish_delivery, DeliveryReport, DeliveryStatus};
use static_cell::StaticCell;

use super::config::{DELIVERY_REPORTS, OUTBOUND, PEER_MAC};

/// Station-mode radio with ESP-NOW on top; the controller must outlive it.
pub(crate) struct RadioLink {
    controller: WifiController<'static>,
    esp_now: EspNow<'static>,
}

pub(crate) fn setup(wifi: esp_hal::peripherals::WIFI<'static>) -> Result<RadioLink, &'static str> {
    static RADIO_CTRL: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();

    let radio_ctrl = esp_radio::init().map_err(|err| {
        log::error!("radio: esp_radio::init err={:?}", err);
        "radio: esp_radio::init failed"
    })?;
    let radio_ctrl = RADIO_CTRL.init(radio_ctrl);
    let (mut controller, ifaces) =
        esp_radio::wifi::new(radio_ctrl, wifi, Default::default()).map_err(|err| {
            log::error!("radio: wifi init err={:?}", err);
            "radio: wifi init failed"
        })?;
    controller
        .set_config(&ModeConfig::Client(ClientConfig::default()))
        .map_err(|err| {
            log::error!("radio: station config err={:?}", err);
            "radio: station config failed"
        })?;

    Ok(RadioLink {
        controller,
        esp_now: ifaces.esp_now,
    })
}

#[embassy_executor::task]
pub(crate) async fn radio_task(mut link: RadioLink) {
    if let Err(err) = link.controller.start_async().await {
        log::error!("radio: wifi start err={:?}", err);
        return;
    }
    let peer = PeerInfo {
        interface: EspNowWifiInterface::Sta,
        peer_address: PEER_MAC,
        lmk: None,
        channel: None,
        encrypt: false,
    };
    if let Err(err) = link.esp_now.add_peer(peer) {
        log::error!("radio: add peer err={:?}", err);
        return;
    }
    log::info!("radio: esp-now peer {:02x?}", PEER_MAC);

    loop {
        let payload = OUTBOUND.receive().await;
        let status = match link.esp_now.send_async(&PEER_MAC, payload.as_bytes()).await {
            Ok(()) => DeliveryStatus::Delivered,
            Err(err) => {
                log::warn!("radio: send {} err={:?}", payload, err);
                DeliveryStatus::Failed
            }
        };
        let _ = publish_delivery(&DELIVERY_REPORTS, DeliveryReport { payload, status });
    }
}
