use core::fmt;

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel};

use super::payload::LinkPayload;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportError {
    /// The outbound queue towards the radio owner is full.
    QueueFull,
    /// The link layer refused the frame outright.
    Rejected,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::QueueFull => "outbound queue full",
            Self::Rejected => "link rejected frame",
        })
    }
}

/// Fire-and-forget datagram send towards the actuator.
///
/// `Ok` only means the frame was accepted for transmission; delivery is
/// reported separately through `DeliveryReport`s.
pub trait Transport {
    fn send(&mut self, payload: &LinkPayload) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, payload: &LinkPayload) -> Result<(), TransportError> {
        (**self).send(payload)
    }
}

/// Hands frames to the task that owns the radio.
///
/// The game loop and the radio driver never touch the same handle; the
/// channel is the only shared state between them.
pub struct QueuedTransport<'a, M: RawMutex, const N: usize> {
    outbound: &'a Channel<M, LinkPayload, N>,
}

impl<'a, M: RawMutex, const N: usize> QueuedTransport<'a, M, N> {
    pub const fn new(outbound: &'a Channel<M, LinkPayload, N>) -> Self {
        Self { outbound }
    }
}

impl<M: RawMutex, const N: usize> Transport for QueuedTransport<'_, M, N> {
    fn send(&mut self, payload: &LinkPayload) -> Result<(), TransportError> {
        self.outbound
            .try_send(payload.clone())
            .map_err(|_| TransportError::QueueFull)
    }
}

#[cfg(test)]
mod tests {
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    use super::*;
    use crate::game::Command;

    #[test]
    fn queued_transport_reports_full_queue() {
        let outbound: Channel<NoopRawMutex, LinkPayload, 1> = Channel::new();
        let mut transport = QueuedTransport::new(&outbound);

        assert_eq!(transport.send(&Command::Deactivate.into()), Ok(()));
        assert_eq!(
            transport.send(&Command::Activate.into()),
            Err(TransportError::QueueFull)
        );
        assert_eq!(
            outbound.try_receive().ok().map(|payload| payload.decode()),
            Some(Ok(Command::Deactivate))
        );
    }
}
