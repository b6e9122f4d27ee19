//! EventHandlerBuilder -- assembles an event handler record.

use std::fmt;

use cxbuild_types::BuilderError;
use cxbuild_types::config::BuilderSettings;
use cxbuild_types::route::{EventHandler, NewEventHandler};
use serde_json::Value;
use tracing::debug;

use super::held::{HeldRecord, check_single_target, non_empty, parse_value};

/// Builds a single `EventHandler`.
///
/// Unlike `TransitionRouteBuilder`, an absent trigger fulfillment is left
/// unset rather than replaced with an empty one.
#[derive(Debug, Default)]
pub struct EventHandlerBuilder {
    held: HeldRecord<EventHandler>,
    settings: BuilderSettings,
}

impl EventHandlerBuilder {
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

    pub fn load(
        &mut self,
        record: EventHandler,
        overwrite: bool,
    ) -> Result<&EventHandler, BuilderError> {
        self.held.put(record, overwrite).map(|r| &*r)
    }

    pub fn load_json(
        &mut self,
        value: Value,
        overwrite: bool,
    ) -> Result<&EventHandler, BuilderError> {
        let record = HeldRecord::<EventHandler>::parse(value)?;
        self.load(record, overwrite)
    }

    /// Hold a new handler for `args.event`.
    ///
    /// An empty event name is accepted unless `reject_empty_event` is set.
    pub fn create_empty(
        &mut self,
        args: NewEventHandler,
        overwrite: bool,
    ) -> Result<&EventHandler, BuilderError> {
        let target_page = non_empty(args.target_page);
        let target_flow = non_empty(args.target_flow);

        if self.settings.reject_empty_event && args.event.is_empty() {
            return Err(BuilderError::MissingField("event must not be empty".to_string()));
        }
        check_single_target(&target_page, &target_flow)?;
        self.held.check_vacant(overwrite)?;

        debug!(event = %args.event, "Creating event handler");
        let record = EventHandler {
            event: args.event,
            trigger_fulfillment: args.trigger_fulfillment,
            target_page,
            target_flow,
            ..EventHandler::default()
        };
        self.held.put(record, overwrite).map(|r| &*r)
    }

    /// `create_empty` with arguments given as a JSON object. `event` must
    /// be present.
    pub fn create_empty_json(
        &mut self,
        args: Value,
        overwrite: bool,
    ) -> Result<&EventHandler, BuilderError> {
        if let Value::Object(map) = &args {
            if !map.contains_key("event") {
                return Err(BuilderError::MissingField("event is required".to_string()));
            }
        }
        let args: NewEventHandler = parse_value(args, "event handler arguments")?;
        self.create_empty(args, overwrite)
    }

    pub fn record(&self) -> Result<&EventHandler, BuilderError> {
        self.held.get()
    }

    pub fn record_mut(&mut self) -> Result<&mut EventHandler, BuilderError> {
        self.held.get_mut()
    }

    pub fn is_loaded(&self) -> bool {
        self.held.is_loaded()
    }

    pub fn into_record(self) -> Option<EventHandler> {
        self.held.into_inner()
    }
}

impl From<EventHandler> for EventHandlerBuilder {
    fn from(record: EventHandler) -> Self {
        Self {
            held: HeldRecord::from(record),
            settings: BuilderSettings::default(),
        }
    }
}

impl fmt::Display for EventHandlerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.held, f)
    }
}
