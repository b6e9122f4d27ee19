//! TransitionRouteBuilder -- assembles a transition route record.

use std::fmt;

use cxbuild_types::BuilderError;
use cxbuild_types::config::BuilderSettings;
use cxbuild_types::route::{NewTransitionRoute, TransitionRoute};
use serde_json::Value;
use tracing::debug;

use super::held::{HeldRecord, check_single_target, non_empty, parse_value};

/// Builds a single `TransitionRoute`.
///
/// A created route always carries a trigger fulfillment: when none is
/// given, an empty one is stored. `EventHandlerBuilder` does not do this.
#[derive(Debug, Default)]
pub struct TransitionRouteBuilder {
    held: HeldRecord<TransitionRoute>,
    settings: BuilderSettings,
}

impl TransitionRouteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: BuilderSettings) -> Self {
        Self {
            held: HeldRecord::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    /// Adopt an existing transition route as the held record.
    pub fn load(
        &mut self,
        record: TransitionRoute,
        overwrite: bool,
    ) -> Result<&TransitionRoute, BuilderError> {
        self.held.put(record, overwrite).map(|r| &*r)
    }

    /// Adopt a route given in the service's JSON form.
    pub fn load_json(
        &mut self,
        value: Value,
        overwrite: bool,
    ) -> Result<&TransitionRoute, BuilderError> {
        let record = HeldRecord::<TransitionRoute>::parse(value)?;
        self.load(record, overwrite)
    }

    /// Hold a new route built from `args`.
    ///
    /// With the default settings neither `intent` nor `condition` is
    /// required; `require_route_trigger` makes one of them mandatory.
    pub fn create_empty(
        &mut self,
        args: NewTransitionRoute,
        overwrite: bool,
    ) -> Result<&TransitionRoute, BuilderError> {
        let intent = non_empty(args.intent);
        let condition = non_empty(args.condition);
        let target_page = non_empty(args.target_page);
        let target_flow = non_empty(args.target_flow);

        check_single_target(&target_page, &target_flow)?;
        if self.settings.require_route_trigger && intent.is_none() && condition.is_none() {
            return Err(BuilderError::MissingField(
                "at least one of intent or condition must be specified".to_string(),
            ));
        }
        self.held.check_vacant(overwrite)?;

        let substituted = args.trigger_fulfillment.is_none();
        let record = TransitionRoute {
            intent,
            condition,
            trigger_fulfillment: Some(args.trigger_fulfillment.unwrap_or_default()),
            target_page,
            target_flow,
            ..TransitionRoute::default()
        };
        debug!(substituted, "Creating transition route");
        self.held.put(record, overwrite).map(|r| &*r)
    }

    /// `create_empty` with arguments given as a JSON object (`intent`,
    /// `condition`, `trigger_fulfillment`, `target_page`, `target_flow`).
    ///
    /// `trigger_fulfillment` uses the service's fulfillment JSON.
    pub fn create_empty_json(
        &mut self,
        args: Value,
        overwrite: bool,
    ) -> Result<&TransitionRoute, BuilderError> {
        let args: NewTransitionRoute = parse_value(args, "transition route arguments")?;
        self.create_empty(args, overwrite)
    }

    pub fn record(&self) -> Result<&TransitionRoute, BuilderError> {
        self.held.get()
    }

    pub fn record_mut(&mut self) -> Result<&mut TransitionRoute, BuilderError> {
        self.held.get_mut()
    }

    pub fn is_loaded(&self) -> bool {
        self.held.is_loaded()
    }

    pub fn into_record(self) -> Option<TransitionRoute> {
        self.held.into_inner()
    }
}

impl From<TransitionRoute> for TransitionRouteBuilder {
    fn from(record: TransitionRoute) -> Self {
        Self {
            held: HeldRecord::from(record),
            settings: BuilderSettings::default(),
        }
    }
}

impl fmt::Display for TransitionRouteBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.held, f)
    }
}
