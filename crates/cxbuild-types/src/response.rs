//! Response messages returned by a conversational agent.
//!
//! A `ResponseMessage` is one populated `MessageContent` variant plus the
//! optional `channel` it targets. The variant serializes as the single
//! content field of the service's `ResponseMessage` object
//! (e.g. `{"playAudio": {...}, "channel": "web"}`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::BuilderError;

/// A single rich response. Exactly one content variant is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(flatten)]
    pub content: MessageContent,
    /// Channel the message is meant for; unset means every channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Schema fields not modelled here, kept so exported JSON round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The content variants of a response message.
///
/// The first six are what builders produce. The rest only appear in
/// records exported by the service and are carried as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageContent {
    Text(Text),
    LiveAgentHandoff(LiveAgentHandoff),
    ConversationSuccess(ConversationSuccess),
    OutputAudioText(OutputAudioText),
    PlayAudio(PlayAudio),
    TelephonyTransferCall(TelephonyTransferCall),
    /// Custom payload for integrations.
    Payload(Map<String, Value>),
    MixedAudio(Value),
    EndInteraction(Value),
    KnowledgeInfoCard(Value),
}

impl MessageContent {
    /// The builder tag for this content, `None` for service-only variants.
    pub fn kind(&self) -> Option<ResponseKind> {
        match self {
            Self::Text(_) => Some(ResponseKind::Text),
            Self::LiveAgentHandoff(_) => Some(ResponseKind::LiveAgentHandoff),
            Self::ConversationSuccess(_) => Some(ResponseKind::ConversationSuccess),
            Self::OutputAudioText(_) => Some(ResponseKind::OutputAudioText),
            Self::PlayAudio(_) => Some(ResponseKind::PlayAudio),
            Self::TelephonyTransferCall(_) => Some(ResponseKind::TelephonyTransferCall),
            Self::Payload(_) | Self::MixedAudio(_) | Self::EndInteraction(_) => None,
            Self::KnowledgeInfoCard(_) => None,
        }
    }
}

impl From<MessageContent> for ResponseMessage {
    fn from(content: MessageContent) -> Self {
        Self {
            content,
            channel: None,
            extra: Map::new(),
        }
    }
}

impl ResponseMessage {
    /// Plain text response made of one or more segments.
    pub fn text<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MessageContent::Text(Text {
            text: segments.into_iter().map(Into::into).collect(),
            allow_playback_interruption: false,
        })
        .into()
    }

    pub fn live_agent_handoff(metadata: Map<String, Value>) -> Self {
        MessageContent::LiveAgentHandoff(LiveAgentHandoff { metadata }).into()
    }

    pub fn conversation_success(metadata: Map<String, Value>) -> Self {
        MessageContent::ConversationSuccess(ConversationSuccess { metadata }).into()
    }

    /// Synthesized speech; `mode` selects whether `content` is plain text
    /// or SSML markup.
    pub fn output_audio_text(content: impl Into<String>, mode: AudioMode) -> Self {
        let content = content.into();
        let source = match mode {
            AudioMode::Text => AudioSource::Text(content),
            AudioMode::Ssml => AudioSource::Ssml(content),
        };
        MessageContent::OutputAudioText(OutputAudioText {
            source,
            allow_playback_interruption: false,
        })
        .into()
    }

    /// Pre-recorded audio. The URI is passed through unchecked.
    pub fn play_audio(audio_uri: impl Into<String>) -> Self {
        MessageContent::PlayAudio(PlayAudio {
            audio_uri: audio_uri.into(),
            allow_playback_interruption: false,
        })
        .into()
    }

    /// Transfer the call to an E.164 number. The number is passed through
    /// unchecked.
    pub fn telephony_transfer_call(phone_number: impl Into<String>) -> Self {
        MessageContent::TelephonyTransferCall(TelephonyTransferCall {
            phone_number: phone_number.into(),
        })
        .into()
    }

    /// Restrict the message to one channel.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn kind(&self) -> Option<ResponseKind> {
        self.content.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    #[serde(default)]
    pub text: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_playback_interruption: bool,
}

/// Signals that the conversation should be handed to a human agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveAgentHandoff {
    /// Free-form payload forwarded to the handoff integration.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Signals that the agent handled the conversation successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSuccess {
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputAudioText {
    #[serde(flatten)]
    pub source: AudioSource,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_playback_interruption: bool,
}

/// Exactly one of plain text or SSML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    Text(String),
    Ssml(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayAudio {
    pub audio_uri: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_playback_interruption: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelephonyTransferCall {
    pub phone_number: String,
}

/// The string tags callers use to pick a response variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    Text,
    LiveAgentHandoff,
    ConversationSuccess,
    OutputAudioText,
    PlayAudio,
    TelephonyTransferCall,
}

impl ResponseKind {
    pub const ALL: [ResponseKind; 6] = [
        ResponseKind::Text,
        ResponseKind::LiveAgentHandoff,
        ResponseKind::ConversationSuccess,
        ResponseKind::OutputAudioText,
        ResponseKind::PlayAudio,
        ResponseKind::TelephonyTransferCall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Text => "text",
            ResponseKind::LiveAgentHandoff => "live_agent_handoff",
            ResponseKind::ConversationSuccess => "conversation_success",
            ResponseKind::OutputAudioText => "output_audio_text",
            ResponseKind::PlayAudio => "play_audio",
            ResponseKind::TelephonyTransferCall => "telephony_transfer_call",
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseKind {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResponseKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let expected: Vec<&str> = ResponseKind::ALL.iter().map(|k| k.as_str()).collect();
                BuilderError::InvalidArgument(format!(
                    "response type '{s}' should be one of: {}",
                    expected.join(", ")
                ))
            })
    }
}

/// How the content of an output-audio-text message is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioMode {
    Text,
    /// SSML markup. Accepts `ssml` or `markup` when parsed.
    Ssml,
}

impl FromStr for AudioMode {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(AudioMode::Text),
            "ssml" | "markup" => Ok(AudioMode::Ssml),
            other => Err(BuilderError::InvalidArgument(format!(
                "mode '{other}' should be either 'text' or 'ssml' for output_audio_text"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_serializes_as_single_field() {
        let msg = ResponseMessage::text(["a", "b"]);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"text": {"text": ["a", "b"]}}));
    }

    #[test]
    fn test_output_audio_text_modes() {
        let plain = serde_json::to_value(ResponseMessage::output_audio_text("hi", AudioMode::Text))
            .unwrap();
        assert_eq!(plain, json!({"outputAudioText": {"text": "hi"}}));

        let ssml = serde_json::to_value(ResponseMessage::output_audio_text(
            "<speak>hi</speak>",
            AudioMode::Ssml,
        ))
        .unwrap();
        assert_eq!(ssml, json!({"outputAudioText": {"ssml": "<speak>hi</speak>"}}));
    }

    #[test]
    fn test_exported_output_audio_text_with_interruption_flag() {
        let msg: ResponseMessage = serde_json::from_value(json!({
            "outputAudioText": {"ssml": "<speak>Hold on</speak>", "allowPlaybackInterruption": true}
        }))
        .unwrap();
        match msg.content {
            MessageContent::OutputAudioText(audio) => {
                assert_eq!(audio.source, AudioSource::Ssml("<speak>Hold on</speak>".to_string()));
                assert!(audio.allow_playback_interruption);
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_camel_case_payload_fields() {
        let audio = serde_json::to_value(ResponseMessage::play_audio("gs://bucket/a.wav")).unwrap();
        assert_eq!(audio, json!({"playAudio": {"audioUri": "gs://bucket/a.wav"}}));

        let call =
            serde_json::to_value(ResponseMessage::telephony_transfer_call("+15551234567")).unwrap();
        assert_eq!(
            call,
            json!({"telephonyTransferCall": {"phoneNumber": "+15551234567"}})
        );
    }

    #[test]
    fn test_handoff_deserializes_from_service_json() {
        let msg: ResponseMessage =
            serde_json::from_value(json!({"liveAgentHandoff": {"metadata": {"queue": "billing"}}}))
                .unwrap();
        assert_eq!(msg.kind(), Some(ResponseKind::LiveAgentHandoff));
        match msg.content {
            MessageContent::LiveAgentHandoff(h) => assert_eq!(h.metadata["queue"], "billing"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_channel_and_unmodelled_fields_round_trip() {
        let exported = json!({
            "text": {"text": ["Hi there"], "allowPlaybackInterruption": false},
            "channel": "web",
            "languageCode": "en"
        });
        let msg: ResponseMessage = serde_json::from_value(exported.clone()).unwrap();
        assert_eq!(msg.channel.as_deref(), Some("web"));
        assert_eq!(msg.kind(), Some(ResponseKind::Text));
        assert_eq!(msg.extra["languageCode"], "en");
        assert!(!msg.extra.contains_key("text"));

        let plain = ResponseMessage::text(["Hi there"]).with_channel("web");
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({"text": {"text": ["Hi there"]}, "channel": "web"})
        );
    }

    #[test]
    fn test_service_only_content_has_no_builder_kind() {
        let msg: ResponseMessage =
            serde_json::from_value(json!({"payload": {"richContent": [[{"type": "chips"}]]}}))
                .unwrap();
        assert!(matches!(msg.content, MessageContent::Payload(_)));
        assert_eq!(msg.kind(), None);
    }

    #[test]
    fn test_response_kind_from_str() {
        for kind in ResponseKind::ALL {
            assert_eq!(kind.as_str().parse::<ResponseKind>().unwrap(), kind);
        }
        let err = "card".parse::<ResponseKind>().unwrap_err();
        assert!(matches!(err, BuilderError::InvalidArgument(_)));
        assert!(err.to_string().contains("telephony_transfer_call"));
    }

    #[test]
    fn test_audio_mode_accepts_markup_alias() {
        assert_eq!("text".parse::<AudioMode>().unwrap(), AudioMode::Text);
        assert_eq!("ssml".parse::<AudioMode>().unwrap(), AudioMode::Ssml);
        assert_eq!("markup".parse::<AudioMode>().unwrap(), AudioMode::Ssml);
        assert!(matches!(
            "html".parse::<AudioMode>(),
            Err(BuilderError::InvalidArgument(_))
        ));
    }
}
