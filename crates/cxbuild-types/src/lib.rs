//! Record shapes for conversational-agent configuration.
//!
//! The structs in this crate mirror the dialogue-management service's REST
//! schema for fulfillments, transition routes and event handlers. Field
//! names serialize in the service's camelCase form and must not drift from
//! it.
//!
//! Zero builder logic -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod fulfillment;
pub mod response;
pub mod route;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use error::{BuilderError, RecordKind};

/// A configuration record that a builder can hold.
///
/// Implemented by the three top-level record types so the held-record slot
/// can report which kind it is guarding in errors and logs.
pub trait Record: Serialize + DeserializeOwned {
    const KIND: RecordKind;

    /// Top-level JSON keys that only the other record kinds define. A
    /// document carrying one of them is some other record.
    const OTHER_RECORD_KEYS: &'static [&'static str];
}

impl Record for fulfillment::Fulfillment {
    const KIND: RecordKind = RecordKind::Fulfillment;
    const OTHER_RECORD_KEYS: &'static [&'static str] = &[
        "event",
        "intent",
        "condition",
        "triggerFulfillment",
        "targetPage",
        "targetFlow",
    ];
}

impl Record for route::TransitionRoute {
    const KIND: RecordKind = RecordKind::TransitionRoute;
    const OTHER_RECORD_KEYS: &'static [&'static str] = &[
        "event",
        "messages",
        "webhook",
        "tag",
        "setParameterActions",
        "conditionalCases",
    ];
}

impl Record for route::EventHandler {
    const KIND: RecordKind = RecordKind::EventHandler;
    const OTHER_RECORD_KEYS: &'static [&'static str] = &[
        "intent",
        "condition",
        "messages",
        "webhook",
        "tag",
        "setParameterActions",
        "conditionalCases",
    ];
}
