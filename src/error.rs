use core::fmt;

use crate::gesture_engine::GestureKind;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GestureError {
    /// The platform refused sensor or key-event access; the gesture channel
    /// is not active and the caller should hide it.
    SourceUnavailable { kind: GestureKind, reason: String },
    ChannelDisabled(GestureKind),
    AlreadyAttached(GestureKind),
    InvalidConfig(&'static str),
    QueueFull,
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnavailable { kind, reason } => {
                write!(f, "{} source unavailable: {reason}", kind.label())
            }
            Self::ChannelDisabled(kind) => write!(f, "{} channel is disabled", kind.label()),
            Self::AlreadyAttached(kind) => write!(f, "{} channel is already attached", kind.label()),
            Self::InvalidConfig(msg) => write!(f, "invalid detector config: {msg}"),
            Self::QueueFull => f.write_str("input queue is full"),
        }
    }
}

impl std::error::Error for GestureError {}

/// Failure reported by an external store write.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SinkError {
    message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SinkError {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DispatchError {
    LocationUnavailable,
    Sink(SinkError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocationUnavailable => f.write_str("location not available"),
            Self::Sink(err) => write!(f, "dispatch write failed: {err}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LocationUnavailable => None,
            Self::Sink(err) => Some(err),
        }
    }
}

impl From<SinkError> for DispatchError {
    fn from(err: SinkError) -> Self {
        Self::Sink(err)
    }
}

/// Platform refusal returned by a source's `start`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceUnavailable {
    pub reason: String,
}

impl SourceUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SourceUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for SourceUnavailable {}
