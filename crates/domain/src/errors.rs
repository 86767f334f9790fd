use thiserror::Error;

/// Failures while turning a schedule dataset into a [`crate::ScheduleStore`].
///
/// Always fatal: the server refuses to start with a partially loaded schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to read schedule {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Malformed schedule document: {0}")]
    Malformed(String),

    #[error("Talk {talk} is missing required field '{field}'")]
    MissingField { talk: String, field: &'static str },

    #[error("Talk {talk} has an invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        talk: String,
        value: String,
        reason: String,
    },

    #[error("Talk {talk} has an invalid duration '{value}'")]
    InvalidDuration { talk: String, value: String },

    #[error("Duplicate talk id: {0}")]
    DuplicateId(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid packet: {0}")]
    InvalidPacket(String),

    #[error("Unsupported network layer (IP version {0})")]
    UnsupportedNetworkLayer(u8),

    #[error("Packet originated from the server itself")]
    SelfTraffic,

    #[error("Failed to format response: {0}")]
    Formatting(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Transport closed")]
    TransportClosed,
}

impl DomainError {
    /// Drops that are expected on a sniffing transport and not worth more than a trace line.
    pub fn is_silent_drop(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidPacket(_)
                | DomainError::UnsupportedNetworkLayer(_)
                | DomainError::SelfTraffic
        )
    }
}
