use crate::entity::FeedEntry;
use chrono::{DateTime, Datelike};

/// Characters the platform markup layer rejects inside spoken text.
const DENYLIST: &[char] = &[
    '|', '&', ';', '$', '%', '@', '"', '<', '>', '(', ')', '+', ',',
];

pub fn sanitize(text: &str) -> String {
    text.trim().chars().filter(|c| !DENYLIST.contains(c)).collect()
}

// Year is always masked; the day is spoken one ahead of the parsed
// day-of-month. Both are load-bearing for platform acceptance.
fn spoken_date(pub_date: &str) -> Option<String> {
    let date = DateTime::parse_from_rfc2822(pub_date).ok()?;
    Some(format!(
        "<say-as interpret-as=\"date\">????{:02}{:02}</say-as>",
        date.month(),
        date.day() + 1
    ))
}

/// Single-line, speech-safe description of the latest episode.
pub fn episode_response(podcast_name: &str, entry: &FeedEntry) -> String {
    let description = sanitize(&entry.description);
    let text = match spoken_date(&entry.pub_date) {
        Some(date) => format!(
            "The latest episode from {} is titled: {}. The description says: {}. It was released on {}",
            podcast_name, entry.title, description, date
        ),
        None => format!(
            "The latest episode from {} is titled: {}. The description says: {}.",
            podcast_name, entry.title, description
        ),
    };
    text.replace('\n', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(description: &str, pub_date: &str) -> FeedEntry {
        FeedEntry {
            title: "Episode Two".to_string(),
            description: description.to_string(),
            pub_date: pub_date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn strips_every_denylisted_character() {
        let out = sanitize(r#"a|b&c;d$e%f@g"h<i>j(k)l+m,n"#);
        assert_eq!(out, "abcdefghijklmn");
    }

    #[test]
    fn response_mentions_podcast_title_and_description() {
        let e = entry("A clean description", "Tue, 10 Mar 2020 12:00:00 +0000");
        let out = episode_response("Example Show", &e);
        assert!(out.contains("Example Show"));
        assert!(out.contains("Episode Two"));
        assert!(out.contains("A clean description"));
    }

    #[test]
    fn response_is_free_of_denylisted_characters() {
        let e = entry(
            r#"a|b&c;d$e%f@g"h<i>j(k)l+m,n"#,
            "Tue, 10 Mar 2020 12:00:00 +0000",
        );
        let out = episode_response("Example Show", &e);
        assert!(out.contains("abcdefghijklmn"));
        let spoken = out.replace(r#"<say-as interpret-as="date">"#, "").replace("</say-as>", "");
        assert!(DENYLIST.iter().all(|c| !spoken.contains(*c)));
    }

    #[test]
    fn date_is_masked_and_shifted() {
        let e = entry("desc", "Tue, 10 Mar 2020 12:00:00 +0000");
        let out = episode_response("Example Show", &e);
        assert!(out.contains(r#"<say-as interpret-as="date">????0311</say-as>"#));
    }

    #[test]
    fn month_end_shifts_past_the_last_day() {
        let e = entry("desc", "Thu, 31 Dec 2020 08:00:00 +0000");
        let out = episode_response("Example Show", &e);
        assert!(out.contains("????1232"));
    }

    #[test]
    fn unparseable_date_drops_the_release_clause() {
        let e = entry("desc", "sometime last week");
        let out = episode_response("Example Show", &e);
        assert!(!out.contains("released"));
        assert!(out.ends_with("The description says: desc."));
    }

    #[test]
    fn newlines_are_stripped() {
        let e = entry("line one\nline two", "Tue, 10 Mar 2020 12:00:00 +0000");
        let out = episode_response("Example Show", &e);
        assert!(!out.contains('\n'));
        assert!(out.contains("line oneline two"));
    }
}
