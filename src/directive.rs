use crate::entity::FeedEntry;

/// Playback control handed back to the platform. Play always replaces the
/// whole queue and starts at offset zero; the stream url doubles as the
/// de-duplication token.
#[derive(Debug, PartialEq, Clone)]
pub enum AudioDirective {
    Play {
        url: String,
        token: String,
        offset_ms: u64,
    },
    Stop,
}

impl AudioDirective {
    pub fn play(entry: &FeedEntry) -> Self {
        let url = to_https(&entry.enclosure_url);
        AudioDirective::Play {
            token: url.clone(),
            url,
            offset_ms: 0,
        }
    }

    pub fn stop() -> Self {
        AudioDirective::Stop
    }
}

// scheme-prefix substitution only, no url parsing
fn to_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}
