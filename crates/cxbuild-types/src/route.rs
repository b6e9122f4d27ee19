//! Transition routes and event handlers.
//!
//! Both records pair a trigger (an intent/condition, or a named event) with
//! what happens next: an optional fulfillment and at most one destination,
//! either a page or a flow.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fulfillment::Fulfillment;

/// Moves the conversation when an intent matches and/or a condition holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRoute {
    /// Server-assigned identifier; left unset by builders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_fulfillment: Option<Fulfillment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_flow: Option<String>,
    /// Schema fields not modelled here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Runs a fulfillment and/or moves the conversation when an event fires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHandler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_fulfillment: Option<Fulfillment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_flow: Option<String>,
    /// Schema fields not modelled here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Arguments for creating an empty transition route.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewTransitionRoute {
    pub intent: Option<String>,
    pub condition: Option<String>,
    /// Replaced by an empty fulfillment when absent.
    pub trigger_fulfillment: Option<Fulfillment>,
    pub target_page: Option<String>,
    pub target_flow: Option<String>,
}

/// Arguments for creating an empty event handler.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewEventHandler {
    pub event: String,
    /// Stored as-is; an absent fulfillment stays unset.
    #[serde(default)]
    pub trigger_fulfillment: Option<Fulfillment>,
    #[serde(default)]
    pub target_page: Option<String>,
    #[serde(default)]
    pub target_flow: Option<String>,
}

impl NewEventHandler {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..Self::default()
        }
    }
}
