use std::fmt;

use thiserror::Error;

/// The record types a builder can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Fulfillment,
    TransitionRoute,
    EventHandler,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Fulfillment => write!(f, "Fulfillment"),
            RecordKind::TransitionRoute => write!(f, "TransitionRoute"),
            RecordKind::EventHandler => write!(f, "EventHandler"),
        }
    }
}

/// Errors raised by builder operations.
///
/// Every error is returned to the immediate caller; builders never retry
/// or recover internally.
#[derive(Debug, Error, PartialEq)]
pub enum BuilderError {
    /// The operation needs a held record and the builder is empty.
    #[error("no {kind} is held; create an empty one or load an existing one first")]
    NotLoaded { kind: RecordKind },

    /// A supplied value does not have the expected type or record shape.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A record is already held and `overwrite` was not set.
    #[error("a {kind} is already held; pass overwrite to replace it")]
    AlreadyLoaded { kind: RecordKind },

    /// Unrecognized enumerated tag or malformed literal.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("conflicting fields: {0}")]
    ConflictingFields(String),
}
