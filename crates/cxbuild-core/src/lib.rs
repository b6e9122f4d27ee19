//! Builders for conversational-agent configuration records.
//!
//! Each builder owns at most one record of its type, created empty or
//! adopted whole, and validates every argument before mutating it. The
//! record shapes live in `cxbuild-types`; this crate adds no I/O.

pub mod builder;

pub use builder::event::EventHandlerBuilder;
pub use builder::fulfillment::FulfillmentBuilder;
pub use builder::held::HeldRecord;
pub use builder::route::TransitionRouteBuilder;

#[cfg(test)]
mod tests {
    use super::*;
    use cxbuild_types::BuilderError;
    use cxbuild_types::config::BuilderSettings;
    use cxbuild_types::fulfillment::NewFulfillment;
    use cxbuild_types::route::{NewEventHandler, NewTransitionRoute};
    use serde_json::json;

    #[test]
    fn test_compose_route_and_handler_from_built_fulfillment() {
        let mut fulfillment = FulfillmentBuilder::new();
        fulfillment
            .create_empty(
                NewFulfillment {
                    webhook: Some("projects/p/locations/l/agents/a/webhooks/orders".to_string()),
                    tag: Some("lookup-order".to_string()),
                    ..NewFulfillment::default()
                },
                false,
            )
            .unwrap();
        fulfillment
            .add_response_message("text", &json!("Looking that up."), None)
            .unwrap();
        fulfillment
            .add_parameter_presets(&json!({"order_status": "pending"}))
            .unwrap();
        let fulfillment = fulfillment.into_record().unwrap();

        let status_page = "projects/p/locations/l/agents/a/flows/f/pages/status";
        let mut route = TransitionRouteBuilder::new();
        route
            .create_empty(
                NewTransitionRoute {
                    intent: Some("projects/p/locations/l/agents/a/intents/order".to_string()),
                    trigger_fulfillment: Some(fulfillment.clone()),
                    target_page: Some(status_page.to_string()),
                    ..NewTransitionRoute::default()
                },
                false,
            )
            .unwrap();

        let mut handler = EventHandlerBuilder::new();
        handler
            .create_empty(
                NewEventHandler {
                    trigger_fulfillment: Some(fulfillment),
                    ..NewEventHandler::new("webhook.error")
                },
                false,
            )
            .unwrap();

        let route_json = serde_json::to_value(route.record().unwrap()).unwrap();
        assert_eq!(route_json["triggerFulfillment"]["tag"], "lookup-order");
        assert_eq!(
            route_json["triggerFulfillment"]["setParameterActions"][0],
            json!({"parameter": "order_status", "value": "pending"})
        );

        let handler_json = serde_json::to_value(handler.record().unwrap()).unwrap();
        assert_eq!(
            handler_json["triggerFulfillment"]["messages"][0],
            json!({"text": {"text": ["Looking that up."]}})
        );
        assert_eq!(handler_json["event"], "webhook.error");
    }

    #[test]
    fn test_builders_configured_from_toml_settings() {
        let toml_str = r#"
require_route_trigger = true
reject_empty_event = true
"#;
        let settings: BuilderSettings = toml::from_str(toml_str).unwrap();

        let mut route = TransitionRouteBuilder::with_settings(settings.clone());
        assert!(route.settings().require_route_trigger);
        assert!(matches!(
            route.create_empty(NewTransitionRoute::default(), false),
            Err(BuilderError::MissingField(_))
        ));

        let mut handler = EventHandlerBuilder::with_settings(settings);
        assert!(matches!(
            handler.create_empty(NewEventHandler::new(""), false),
            Err(BuilderError::MissingField(_))
        ));

        // Absent keys fall back to the lenient defaults
        let lenient: BuilderSettings = toml::from_str("reject_empty_event = true").unwrap();
        let mut route = TransitionRouteBuilder::with_settings(lenient);
        assert!(route.create_empty(NewTransitionRoute::default(), false).is_ok());
    }
}
