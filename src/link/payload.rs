use core::fmt;

use heapless::Vec;

use crate::config::LINK_PAYLOAD_MAX;
use crate::game::Command;

/// Raw bytes of one datagram on the actuator link; no framing beyond the
/// ASCII command itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkPayload {
    bytes: Vec<u8, LINK_PAYLOAD_MAX>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadError {
    TooLong(usize),
    UnknownCommand,
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong(len) => write!(f, "payload of {len} bytes exceeds {LINK_PAYLOAD_MAX}"),
            Self::UnknownCommand => f.write_str("unknown actuator command"),
        }
    }
}

impl LinkPayload {
    pub fn encode(command: Command) -> Self {
        let mut bytes = Vec::new();
        // Command payloads are at most three bytes.
        let _ = bytes.extend_from_slice(command.as_bytes());
        Self { bytes }
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self, PayloadError> {
        let bytes = Vec::from_slice(raw).map_err(|_| PayloadError::TooLong(raw.len()))?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn decode(&self) -> Result<Command, PayloadError> {
        decode_command(&self.bytes)
    }
}

impl From<Command> for LinkPayload {
    fn from(command: Command) -> Self {
        Self::encode(command)
    }
}

impl fmt::Display for LinkPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.bytes.iter() {
            if byte.is_ascii_graphic() {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

/// Receiver-side decoding of a raw datagram.
pub fn decode_command(raw: &[u8]) -> Result<Command, PayloadError> {
    if raw.len() > LINK_PAYLOAD_MAX {
        return Err(PayloadError::TooLong(raw.len()));
    }
    match raw {
        b"ON" => Ok(Command::Activate),
        b"OFF" => Ok(Command::Deactivate),
        _ => Err(PayloadError::UnknownCommand),
    }
}
