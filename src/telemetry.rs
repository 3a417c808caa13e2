use core::sync::atomic::{AtomicU32, Ordering};

/// Diagnostic counters for one running game.
///
/// Everything here is informational; nothing in the game reads it back.
pub struct Telemetry {
    scores: AtomicU32,
    missing_samples: AtomicU32,
    detections: AtomicU32,
    phase_toggles: AtomicU32,
    commands_sent: AtomicU32,
    send_failures: AtomicU32,
    deliveries_ok: AtomicU32,
    deliveries_failed: AtomicU32,
    feed_rejects: AtomicU32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    pub scores: u32,
    pub missing_samples: u32,
    pub detections: u32,
    pub phase_toggles: u32,
    pub commands_sent: u32,
    pub send_failures: u32,
    pub deliveries_ok: u32,
    pub deliveries_failed: u32,
    pub feed_rejects: u32,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub const fn new() -> Self {
        Self {
            scores: AtomicU32::new(0),
            missing_samples: AtomicU32::new(0),
            detections: AtomicU32::new(0),
            phase_toggles: AtomicU32::new(0),
            commands_sent: AtomicU32::new(0),
            send_failures: AtomicU32::new(0),
            deliveries_ok: AtomicU32::new(0),
            deliveries_failed: AtomicU32::new(0),
            feed_rejects: AtomicU32::new(0),
        }
    }

    pub fn record_score(&self) {
        self.scores.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_sample(&self) {
        self.missing_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_detection(&self) {
        self.detections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_phase_toggle(&self) {
        self.phase_toggles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_command_sent(&self) {
        self.commands_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_send_failure(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivery(&self, delivered: bool) {
        if delivered {
            self.deliveries_ok.fetch_add(1, Ordering::Relaxed);
        } else {
            self.deliveries_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_feed_reject(&self) {
        self.feed_rejects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            scores: self.scores.load(Ordering::Relaxed),
            missing_samples: self.missing_samples.load(Ordering::Relaxed),
            detections: self.detections.load(Ordering::Relaxed),
            phase_toggles: self.phase_toggles.load(Ordering::Relaxed),
            commands_sent: self.commands_sent.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
            deliveries_ok: self.deliveries_ok.load(Ordering::Relaxed),
            deliveries_failed: self.deliveries_failed.load(Ordering::Relaxed),
            feed_rejects: self.feed_rejects.load(Ordering::Relaxed),
        }
    }
}

impl core::fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "scores={} missing={} detections={} toggles={} sent={} send_fail={} delivered={} undelivered={} feed_rejects={}",
            self.scores,
            self.missing_samples,
            self.detections,
            self.phase_toggles,
            self.commands_sent,
            self.send_failures,
            self.deliveries_ok,
            self.deliveries_failed,
            self.feed_rejects,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let telemetry = Telemetry::new();
        telemetry.record_score();
        telemetry.record_score();
        telemetry.record_missing_sample();
        telemetry.record_delivery(true);
        telemetry.record_delivery(false);
        telemetry.record_delivery(false);

        let snapshot = telemetry.snapshot();
        assert_eq!(snapshot.scores, 2);
        assert_eq!(snapshot.missing_samples, 1);
        assert_eq!(snapshot.deliveries_ok, 1);
        assert_eq!(snapshot.deliveries_failed, 2);
        assert_eq!(snapshot.detections, 0);
    }

    #[test]
    fn snapshot_renders_as_one_line() {
        let telemetry = Telemetry::new();
        telemetry.record_feed_reject();
        let line = std::format!("{}", telemetry.snapshot());
        assert!(line.starts_with("scores=0 missing=0"));
        assert!(line.ends_with("feed_rejects=1"));
        assert!(!line.contains('\n'));
    }
}
