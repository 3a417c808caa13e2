use crate::game::Command;
use crate::telemetry::Telemetry;

use super::payload::LinkPayload;
use super::transport::{Transport, TransportError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Dropped(TransportError),
}

/// Turns game commands into exactly one outbound datagram each.
///
/// Failures are logged and counted but never retried: the next phase toggle
/// re-sends the correct polarity anyway.
pub struct CommandDispatcher<'a, T: Transport> {
    transport: T,
    telemetry: &'a Telemetry,
}

impl<'a, T: Transport> CommandDispatcher<'a, T> {
    pub fn new(transport: T, telemetry: &'a Telemetry) -> Self {
        Self {
            transport,
            telemetry,
        }
    }

    pub fn dispatch(&mut self, command: Command) -> DispatchOutcome {
        let payload = LinkPayload::encode(command);
        match self.transport.send(&payload) {
            Ok(()) => {
                self.telemetry.record_command_sent();
                log::info!("sent {}", command.as_str());
                DispatchOutcome::Sent
            }
            Err(err) => {
                self.telemetry.record_send_failure();
                log::warn!("error sending {}: {}", command.as_str(), err);
                DispatchOutcome::Dropped(err)
            }
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingTransport {
        sent: std::vec::Vec<std::vec::Vec<u8>>,
        fail_next: bool,
    }

    impl Transport for RecordingTransport {
        fn send(&mut self, payload: &LinkPayload) -> Result<(), TransportError> {
            if core::mem::take(&mut self.fail_next) {
                return Err(TransportError::Rejected);
            }
            self.sent.push(payload.as_bytes().to_vec());
            Ok(())
        }
    }

    #[test]
    fn each_command_is_one_datagram() {
        let telemetry = Telemetry::new();
        let mut dispatcher = CommandDispatcher::new(RecordingTransport::default(), &telemetry);

        assert_eq!(dispatcher.dispatch(Command::Deactivate), DispatchOutcome::Sent);
        assert_eq!(dispatcher.dispatch(Command::Activate), DispatchOutcome::Sent);

        assert_eq!(
            dispatcher.transport().sent,
            std::vec![b"OFF".to_vec(), b"ON".to_vec()]
        );
        assert_eq!(telemetry.snapshot().commands_sent, 2);
    }

    #[test]
    fn failure_is_counted_not_retried() {
        let telemetry = Telemetry::new();
        let transport = RecordingTransport {
            fail_next: true,
            ..Default::default()
        };
        let mut dispatcher = CommandDispatcher::new(transport, &telemetry);

        assert_eq!(
            dispatcher.dispatch(Command::Activate),
            DispatchOutcome::Dropped(TransportError::Rejected)
        );
        assert!(dispatcher.transport().sent.is_empty());

        assert_eq!(dispatcher.dispatch(Command::Deactivate), DispatchOutcome::Sent);
        let transport = dispatcher.into_transport();
        assert_eq!(transport.sent, std::vec![b"OFF".to_vec()]);

        let snapshot = telemetry.snapshot();
        assert_eq!(snapshot.send_failures, 1);
        assert_eq!(snapshot.commands_sent, 1);
    }
}
