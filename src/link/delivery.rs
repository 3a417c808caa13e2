use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel};

use crate::telemetry::Telemetry;

use super::payload::LinkPayload;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed,
}

/// Link-layer completion notice for one datagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryReport {
    pub payload: LinkPayload,
    pub status: DeliveryStatus,
}

/// Queues a report for diagnostics; reports are dropped when nobody drains
/// them fast enough.
pub fn publish_delivery<M: RawMutex, const N: usize>(
    reports: &Channel<M, DeliveryReport, N>,
    report: DeliveryReport,
) -> bool {
    reports.try_send(report).is_ok()
}

pub fn record_delivery(report: &DeliveryReport, telemetry: &Telemetry) {
    let delivered = matches!(report.status, DeliveryStatus::Delivered);
    telemetry.record_delivery(delivered);
    if delivered {
        log::debug!("delivered {}", report.payload);
    } else {
        log::warn!("delivery failed for {}", report.payload);
    }
}

/// Records every queued report; returns how many were handled.
pub fn drain_delivery_reports<M: RawMutex, const N: usize>(
    reports: &Channel<M, DeliveryReport, N>,
    telemetry: &Telemetry,
) -> usize {
    let mut handled = 0;
    while let Ok(report) = reports.try_receive() {
        record_delivery(&report, telemetry);
        handled += 1;
    }
    handled
}
