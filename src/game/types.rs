#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GamePhase {
    /// Red light: confirmed movement eliminates the player.
    Armed,
    /// Green light: movement is ignored.
    Relaxed,
}

impl GamePhase {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Armed => Self::Relaxed,
            Self::Relaxed => Self::Armed,
        }
    }

    /// Command that announces this phase to the actuator when it is entered.
    ///
    /// Entering red light switches the actuator off, entering green light
    /// switches it on.
    pub const fn entry_command(self) -> Command {
        match self {
            Self::Armed => Command::Deactivate,
            Self::Relaxed => Command::Activate,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Armed => "red",
            Self::Relaxed => "green",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Activate,
    Deactivate,
}

impl Command {
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Activate => b"ON",
            Self::Deactivate => b"OFF",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activate => "ON",
            Self::Deactivate => "OFF",
        }
    }
}

/// Input to the phase machine; one per engine call.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum GameEvent {
    Start,
    Score { score: f32, now_ms: u64 },
    MissingSample,
    CycleTick,
    DeferredDue { now_ms: u64 },
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_alternates_and_announces_literal_polarity() {
        assert_eq!(GamePhase::Armed.toggled(), GamePhase::Relaxed);
        assert_eq!(GamePhase::Armed.toggled().toggled(), GamePhase::Armed);
        assert_eq!(GamePhase::Armed.entry_command().as_bytes(), b"OFF");
        assert_eq!(GamePhase::Relaxed.entry_command().as_bytes(), b"ON");
    }
}
