//! Build a fulfillment, wrap it in a transition route and an event
//! handler, and print both as service JSON.
//!
//! ```sh
//! RUST_LOG=cxbuild_core=debug cargo run -p cxbuild-core --example export_route
//! ```

use cxbuild_core::{EventHandlerBuilder, FulfillmentBuilder, TransitionRouteBuilder};
use cxbuild_observe::{TracingOptions, init_tracing};
use cxbuild_types::fulfillment::NewFulfillment;
use cxbuild_types::route::{NewEventHandler, NewTransitionRoute};
use serde_json::json;

const AGENT: &str = "projects/demo/locations/global/agents/orders";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(&TracingOptions::default())?;

    let mut fulfillment = FulfillmentBuilder::new();
    fulfillment.create_empty(
        NewFulfillment {
            webhook: Some(format!("{AGENT}/webhooks/order-lookup")),
            tag: Some("order-status".to_string()),
            ..NewFulfillment::default()
        },
        false,
    )?;
    fulfillment.add_response_message("text", &json!("Let me look that up."), None)?;
    fulfillment.add_response_message(
        "output_audio_text",
        &json!("<speak>One moment.</speak>"),
        Some("ssml"),
    )?;
    fulfillment.add_parameter_presets(&json!({"lookup_started": "true"}))?;
    let fulfillment = fulfillment
        .into_record()
        .ok_or("fulfillment was never created")?;

    let mut route = TransitionRouteBuilder::new();
    route.create_empty(
        NewTransitionRoute {
            intent: Some(format!("{AGENT}/intents/order-status")),
            trigger_fulfillment: Some(fulfillment),
            target_page: Some(format!("{AGENT}/flows/main/pages/status")),
            ..NewTransitionRoute::default()
        },
        false,
    )?;

    let mut handler = EventHandlerBuilder::new();
    handler.create_empty(
        NewEventHandler {
            target_flow: Some(format!("{AGENT}/flows/fallback")),
            ..NewEventHandler::new("webhook.error")
        },
        false,
    )?;

    println!("{route}");
    println!("{handler}");
    Ok(())
}
