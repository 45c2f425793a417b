use crate::directive::AudioDirective;
use crate::dispatch::{DispatchResult, IntentRequest};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inbound skill request envelope, reduced to what dispatch needs.
#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub request: RequestBody,
    #[serde(default)]
    pub session: Option<Session>,
}

#[derive(Debug, Deserialize)]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub intent: Option<IntentBody>,
}

#[derive(Debug, Deserialize)]
pub struct IntentBody {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
}

impl From<SkillRequest> for IntentRequest {
    fn from(req: SkillRequest) -> Self {
        let session_id = req.session.map(|s| s.session_id);
        let body = req.request;
        if body.kind == "IntentRequest" {
            if let Some(intent) = body.intent {
                let slots = intent
                    .slots
                    .into_iter()
                    .filter_map(|(name, slot)| slot.value.map(|v| (name, v)))
                    .collect();
                return IntentRequest {
                    intent: intent.name,
                    slots,
                    session_id,
                };
            }
        }
        // non-intent requests dispatch on the request type itself
        IntentRequest {
            intent: body.kind,
            slots: HashMap::new(),
            session_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SkillResponse {
    pub version: &'static str,
    pub response: ResponseBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    pub should_end_session: bool,
}

#[derive(Debug, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub ssml: String,
}

impl OutputSpeech {
    fn ssml(text: String) -> Self {
        OutputSpeech {
            kind: "SSML",
            ssml: format!("<speak>{}</speak>", text),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "AudioPlayer.Play", rename_all = "camelCase")]
    Play {
        play_behavior: &'static str,
        audio_item: AudioItem,
    },
    #[serde(rename = "AudioPlayer.Stop")]
    Stop,
}

#[derive(Debug, Serialize)]
pub struct AudioItem {
    pub stream: Stream,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub url: String,
    pub token: String,
    pub offset_in_milliseconds: u64,
}

impl From<AudioDirective> for Directive {
    fn from(directive: AudioDirective) -> Self {
        match directive {
            AudioDirective::Play {
                url,
                token,
                offset_ms,
            } => Directive::Play {
                play_behavior: "REPLACE_ALL",
                audio_item: AudioItem {
                    stream: Stream {
                        url,
                        token,
                        offset_in_milliseconds: offset_ms,
                    },
                },
            },
            AudioDirective::Stop => Directive::Stop,
        }
    }
}

impl From<DispatchResult> for SkillResponse {
    fn from(result: DispatchResult) -> Self {
        let (speech, directive) = match result {
            DispatchResult::Tell(speech) => (Some(speech), None),
            DispatchResult::Control(speech, directive) => (Some(speech), Some(directive)),
            DispatchResult::Acknowledge => (None, None),
        };
        SkillResponse {
            version: "1.0",
            response: ResponseBody {
                output_speech: speech.map(OutputSpeech::ssml),
                directives: directive.map(Directive::from).into_iter().collect(),
                should_end_session: true,
            },
        }
    }
}
