//! Fulfillment record: messages to send, parameters to set and an optional
//! webhook to call when a flow reaches a point needing a response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::response::ResponseMessage;

/// A fulfillment as defined by the service schema.
///
/// Optional fields are omitted from the JSON when unset, so an empty
/// fulfillment serializes as `{}`. Fields the schema defines but this
/// struct does not model are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    /// Response messages, in the order they will be returned.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ResponseMessage>,
    /// Webhook resource name (`projects/.../agents/.../webhooks/<id>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    /// Return queued messages in streaming APIs before the webhook runs.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub return_partial_responses: bool,
    /// Populated into the webhook request; required when `webhook` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_parameter_actions: Vec<SetParameterAction>,
    /// Cascading if/else blocks evaluated when the fulfillment runs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditional_cases: Vec<ConditionalCases>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Fulfillment {
    /// True when no field has been populated.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Assigns `value` to session parameter `parameter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetParameterAction {
    pub parameter: String,
    pub value: Value,
}

/// One group of mutually exclusive cases; the first matching case wins.
///
/// Case bodies nest messages and further cases, and are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionalCases {
    #[serde(default)]
    pub cases: Vec<Value>,
}

/// Arguments for creating an empty fulfillment.
///
/// Deserializable so untyped callers can pass arguments as JSON; unknown
/// keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewFulfillment {
    pub webhook: Option<String>,
    pub tag: Option<String>,
    pub return_partial_responses: bool,
}
