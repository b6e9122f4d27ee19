//! FulfillmentBuilder -- assembles a fulfillment record.
//!
//! Messages and parameter presets are appended in call order. Dynamic
//! entry points (`add_response_message`, `add_parameter_presets`,
//! `*_json`) accept untyped JSON and validate its shape; the typed ones
//! (`push_response_message`, `set_parameter`, `create_empty`) take Rust
//! values directly.

use std::fmt;

use cxbuild_types::BuilderError;
use cxbuild_types::fulfillment::{Fulfillment, NewFulfillment, SetParameterAction};
use cxbuild_types::response::{AudioMode, ResponseKind, ResponseMessage};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::held::{HeldRecord, non_empty, parse_value};

/// Builds a single `Fulfillment`.
#[derive(Debug, Default)]
pub struct FulfillmentBuilder {
    held: HeldRecord<Fulfillment>,
}

impl FulfillmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt an existing fulfillment as the held record.
    pub fn load(
        &mut self,
        record: Fulfillment,
        overwrite: bool,
    ) -> Result<&Fulfillment, BuilderError> {
        self.held.put(record, overwrite).map(|r| &*r)
    }

    /// Adopt a fulfillment given in the service's JSON form.
    ///
    /// Fails with `TypeMismatch` if `value` is not a fulfillment.
    pub fn load_json(
        &mut self,
        value: Value,
        overwrite: bool,
    ) -> Result<&Fulfillment, BuilderError> {
        let record = HeldRecord::<Fulfillment>::parse(value)?;
        self.load(record, overwrite)
    }

    /// Hold a new fulfillment with no messages and no presets.
    ///
    /// `tag` is required whenever `webhook` is given.
    pub fn create_empty(
        &mut self,
        args: NewFulfillment,
        overwrite: bool,
    ) -> Result<&Fulfillment, BuilderError> {
        let webhook = non_empty(args.webhook);
        let tag = non_empty(args.tag);
        if webhook.is_some() && tag.is_none() {
            return Err(BuilderError::MissingField(
                "tag is required when webhook is specified".to_string(),
            ));
        }
        self.held.check_vacant(overwrite)?;

        let record = Fulfillment {
            webhook,
            tag,
            return_partial_responses: args.return_partial_responses,
            ..Fulfillment::default()
        };
        self.held.put(record, overwrite).map(|r| &*r)
    }

    /// `create_empty` with arguments given as a JSON object
    /// (`webhook`, `tag`, `return_partial_responses`).
    pub fn create_empty_json(
        &mut self,
        args: Value,
        overwrite: bool,
    ) -> Result<&Fulfillment, BuilderError> {
        let args: NewFulfillment = parse_value(args, "fulfillment arguments")?;
        self.create_empty(args, overwrite)
    }

    /// Append a response message described by a type tag and a JSON payload.
    ///
    /// Payload shape per tag:
    /// - `text`: a string or a list of strings
    /// - `live_agent_handoff`, `conversation_success`: an object
    /// - `output_audio_text`: a string, with `mode` set to `text` or `ssml`
    /// - `play_audio`: an audio URI string
    /// - `telephony_transfer_call`: an E.164 phone number string
    pub fn add_response_message(
        &mut self,
        response_type: &str,
        message: &Value,
        mode: Option<&str>,
    ) -> Result<&Fulfillment, BuilderError> {
        self.held.get()?;
        let kind: ResponseKind = response_type.parse()?;
        let response = response_message_from_json(kind, message, mode)?;
        self.push_response_message(response)
    }

    /// Append an already-built response message.
    pub fn push_response_message(
        &mut self,
        message: ResponseMessage,
    ) -> Result<&Fulfillment, BuilderError> {
        let record = self.held.get_mut()?;
        let kind = message.kind();
        record.messages.push(message);
        debug!(?kind, messages = record.messages.len(), "Appended response message");
        Ok(&*record)
    }

    /// Append one parameter preset per entry of a string-to-string map,
    /// in the map's order.
    ///
    /// The whole map is validated before anything is appended.
    pub fn add_parameter_presets(
        &mut self,
        parameter_map: &Value,
    ) -> Result<&Fulfillment, BuilderError> {
        let record = self.held.get_mut()?;

        let Value::Object(entries) = parameter_map else {
            return Err(BuilderError::InvalidArgument(
                "parameter_map should be an object of strings".to_string(),
            ));
        };
        let mut presets = Vec::with_capacity(entries.len());
        for (parameter, value) in entries {
            let Value::String(_) = value else {
                return Err(BuilderError::InvalidArgument(format!(
                    "only strings are allowed as parameter_map values; '{parameter}' is {value}"
                )));
            };
            presets.push(SetParameterAction {
                parameter: parameter.clone(),
                value: value.clone(),
            });
        }

        record.set_parameter_actions.extend(presets);
        debug!(
            presets = record.set_parameter_actions.len(),
            "Appended parameter presets"
        );
        Ok(&*record)
    }

    /// Append a single parameter preset.
    pub fn set_parameter(
        &mut self,
        parameter: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&Fulfillment, BuilderError> {
        let record = self.held.get_mut()?;
        record.set_parameter_actions.push(SetParameterAction {
            parameter: parameter.into(),
            value: Value::String(value.into()),
        });
        Ok(&*record)
    }

    /// Placeholder for cascading if/else cases. Only checks that a record
    /// is held; the record is returned unchanged.
    pub fn add_conditional_case(&mut self) -> Result<&Fulfillment, BuilderError> {
        let record = self.held.get()?;
        warn!("Conditional cases are not supported; fulfillment left unchanged");
        Ok(record)
    }

    pub fn record(&self) -> Result<&Fulfillment, BuilderError> {
        self.held.get()
    }

    pub fn record_mut(&mut self) -> Result<&mut Fulfillment, BuilderError> {
        self.held.get_mut()
    }

    pub fn is_loaded(&self) -> bool {
        self.held.is_loaded()
    }

    /// Hand the held record back to the caller.
    pub fn into_record(self) -> Option<Fulfillment> {
        self.held.into_inner()
    }
}

impl From<Fulfillment> for FulfillmentBuilder {
    fn from(record: Fulfillment) -> Self {
        Self {
            held: HeldRecord::from(record),
        }
    }
}

impl fmt::Display for FulfillmentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.held, f)
    }
}

fn response_message_from_json(
    kind: ResponseKind,
    message: &Value,
    mode: Option<&str>,
) -> Result<ResponseMessage, BuilderError> {
    match kind {
        ResponseKind::Text => match message {
            Value::String(text) => Ok(ResponseMessage::text([text.as_str()])),
            Value::Array(items) => {
                let segments = items
                    .iter()
                    .map(|item| {
                        item.as_str().ok_or_else(|| {
                            BuilderError::InvalidArgument(
                                "only strings are allowed in a text message list".to_string(),
                            )
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ResponseMessage::text(segments))
            }
            _ => Err(BuilderError::InvalidArgument(
                "for 'text', message should be a string or a list of strings".to_string(),
            )),
        },
        ResponseKind::LiveAgentHandoff => {
            Ok(ResponseMessage::live_agent_handoff(metadata(kind, message)?))
        }
        ResponseKind::ConversationSuccess => {
            Ok(ResponseMessage::conversation_success(metadata(kind, message)?))
        }
        ResponseKind::OutputAudioText => {
            let content = string_payload(kind, message)?;
            let mode: AudioMode = mode
                .ok_or_else(|| {
                    BuilderError::InvalidArgument(
                        "mode is required for output_audio_text".to_string(),
                    )
                })?
                .parse()?;
            Ok(ResponseMessage::output_audio_text(content, mode))
        }
        ResponseKind::PlayAudio => Ok(ResponseMessage::play_audio(string_payload(kind, message)?)),
        ResponseKind::TelephonyTransferCall => Ok(ResponseMessage::telephony_transfer_call(
            string_payload(kind, message)?,
        )),
    }
}

fn metadata(kind: ResponseKind, message: &Value) -> Result<Map<String, Value>, BuilderError> {
    match message {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(BuilderError::InvalidArgument(format!(
            "for '{kind}', message should be an object"
        ))),
    }
}

fn string_payload(kind: ResponseKind, message: &Value) -> Result<&str, BuilderError> {
    message.as_str().ok_or_else(|| {
        BuilderError::InvalidArgument(format!("for '{kind}', message should be a string"))
    })
}
