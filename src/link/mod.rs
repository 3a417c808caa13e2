//! Actuator link: wire payloads, the transport seam, the command dispatcher
//! and delivery-status reporting.

mod delivery;
mod dispatcher;
mod payload;
mod peer;
mod transport;

pub use delivery::{
    drain_delivery_reports, publish_delivery, record_delivery, DeliveryReport, DeliveryStatus,
};
pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use payload::{decode_command, LinkPayload, PayloadError};
pub use peer::{parse_peer_mac, DEFAULT_PEER_MAC};
pub use transport::{QueuedTransport, Transport, TransportError};
