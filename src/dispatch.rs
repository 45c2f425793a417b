use crate::catalog::Catalog;
use crate::directive::AudioDirective;
use crate::entity::FeedEntry;
use crate::feed::Resolver;
use crate::speech;
use std::collections::HashMap;

pub const UNKNOWN_PODCAST: &str = "I don't know about that podcast";
pub const APOLOGY: &str = "I'm sorry. Something went wrong.";
pub const FAREWELL: &str = "Bye bye.";
pub const CLARIFICATION: &str = "Sorry, I could not understand what you've just said.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Latest,
    PlayLatest,
    Pause,
    Resume,
    Cancel,
    Stop,
    SessionEnded,
    Exception,
    Playback,
    Unhandled,
}

impl Intent {
    /// Unknown identifiers route to `Unhandled`, never a fault.
    pub fn from_id(id: &str) -> Self {
        match id {
            "LatestPodcast" => Intent::Latest,
            "PlayLatestPodcast" => Intent::PlayLatest,
            "AMAZON.PauseIntent" => Intent::Pause,
            "AMAZON.ResumeIntent" => Intent::Resume,
            "AMAZON.CancelIntent" => Intent::Cancel,
            "AMAZON.StopIntent" => Intent::Stop,
            "SessionEndedRequest" => Intent::SessionEnded,
            "ExceptionEncountered" | "System.ExceptionEncountered" => Intent::Exception,
            id if id.starts_with("AudioPlayer.") => Intent::Playback,
            _ => Intent::Unhandled,
        }
    }
}

/// Normalized view of one inbound event. All state a handler may read is
/// carried here; nothing is ambient.
#[derive(Debug, Clone, Default)]
pub struct IntentRequest {
    pub intent: String,
    pub slots: HashMap<String, String>,
    pub session_id: Option<String>,
}

impl IntentRequest {
    pub fn new(intent: impl Into<String>) -> Self {
        IntentRequest {
            intent: intent.into(),
            ..Default::default()
        }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    // an empty slot value reads the same as a missing one
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// One terminal outcome per dispatch: speech, speech plus a playback
/// directive, or an empty acknowledgment for log-only events.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchResult {
    Tell(String),
    Control(String, AudioDirective),
    Acknowledge,
}

enum Resolution {
    Unknown,
    Failed,
    Found(String, FeedEntry),
}

pub struct Dispatcher<'a, R> {
    catalog: &'a Catalog,
    resolver: R,
}

impl<'a, R: Resolver> Dispatcher<'a, R> {
    pub fn new(catalog: &'a Catalog, resolver: R) -> Self {
        Dispatcher { catalog, resolver }
    }

    pub fn dispatch(&self, req: &IntentRequest) -> DispatchResult {
        match Intent::from_id(&req.intent) {
            Intent::Latest => self.describe_latest(req),
            Intent::PlayLatest | Intent::Resume => self.play_latest(req),
            Intent::Pause | Intent::Cancel | Intent::Stop => {
                DispatchResult::Control(FAREWELL.to_string(), AudioDirective::stop())
            }
            Intent::SessionEnded => {
                log::info!("session ended");
                DispatchResult::Acknowledge
            }
            Intent::Exception => {
                log::error!("platform exception reported: {:?}", req);
                DispatchResult::Acknowledge
            }
            Intent::Playback => {
                log::debug!("playback event: {}", req.intent);
                DispatchResult::Acknowledge
            }
            Intent::Unhandled => DispatchResult::Tell(CLARIFICATION.to_string()),
        }
    }

    fn describe_latest(&self, req: &IntentRequest) -> DispatchResult {
        match self.latest_episode(req) {
            Resolution::Unknown => DispatchResult::Tell(UNKNOWN_PODCAST.to_string()),
            Resolution::Failed => DispatchResult::Tell(APOLOGY.to_string()),
            Resolution::Found(name, entry) => {
                DispatchResult::Tell(speech::episode_response(&name, &entry))
            }
        }
    }

    fn play_latest(&self, req: &IntentRequest) -> DispatchResult {
        match self.latest_episode(req) {
            Resolution::Unknown => DispatchResult::Tell(UNKNOWN_PODCAST.to_string()),
            Resolution::Failed => DispatchResult::Tell(APOLOGY.to_string()),
            Resolution::Found(name, entry) => DispatchResult::Control(
                format!("Playing the latest episode of {}", name),
                AudioDirective::play(&entry),
            ),
        }
    }

    // catalog miss short-circuits before any network call
    fn latest_episode(&self, req: &IntentRequest) -> Resolution {
        let name = match req.slot("PodcastName") {
            Some(name) => name,
            None => return Resolution::Unknown,
        };
        let url = match self.catalog.feed_url(name) {
            Some(url) => url,
            None => return Resolution::Unknown,
        };
        match self.resolver.resolve_latest(url) {
            Err(e) => {
                log::error!("feed fetch failed: {}", e);
                Resolution::Failed
            }
            Ok(entries) => match entries.into_iter().next() {
                Some(entry) => Resolution::Found(name.to_string(), entry),
                None => {
                    log::error!("feed at {} has no entries", url);
                    Resolution::Failed
                }
            },
        }
    }
}
