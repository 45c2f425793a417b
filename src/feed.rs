use crate::entity::FeedEntry;
use crate::util;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use simple_error::SimpleError;
use std::io::{BufRead, BufReader};
use std::time::Duration;

pub type FetchResult = Result<Vec<FeedEntry>, SimpleError>;

/// Resolves a feed url to its entries in feed order, newest first as
/// published. An empty feed is `Ok(vec![])`, not an error.
pub trait Resolver {
    fn resolve_latest(&self, url: &str) -> FetchResult;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve_latest(&self, url: &str) -> FetchResult {
        (**self).resolve_latest(url)
    }
}

pub struct Client {
    timeout: Duration,
}

impl Client {
    pub fn new() -> Self {
        Client {
            timeout: Duration::from_secs(10),
        }
    }
}

impl Resolver for Client {
    fn resolve_latest(&self, url: &str) -> FetchResult {
        let resp = ureq::get(url)
            .timeout(self.timeout)
            .call()
            .map_err(util::to_simple)?;
        parse_entries(BufReader::new(resp.into_reader()))
    }
}

enum Field {
    Title,
    Description,
    PubDate,
}

impl Field {
    fn assign(&self, entry: &mut FeedEntry, text: String) {
        match self {
            Field::Title => entry.title = text,
            Field::Description => entry.description = text,
            Field::PubDate => entry.pub_date = text,
        }
    }
}

pub fn parse_entries(rd: impl BufRead) -> FetchResult {
    let mut reader = Reader::from_reader(rd);
    reader.trim_text(true);

    let mut entries: Vec<FeedEntry> = vec![];
    let mut current: Option<FeedEntry> = None;
    let mut field: Option<Field> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event(&mut buf).map_err(util::to_simple)? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.name() {
                b"item" => current = Some(FeedEntry::default()),
                b"title" => field = Some(Field::Title),
                b"description" => field = Some(Field::Description),
                b"pubDate" => field = Some(Field::PubDate),
                b"enclosure" => read_enclosure(e, &reader, current.as_mut())?,
                _ => field = None,
            },
            Event::Text(ref t) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field.as_ref()) {
                    let text = t.unescape_and_decode(&reader).map_err(util::to_simple)?;
                    f.assign(entry, text);
                }
            }
            Event::CData(ref t) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field.as_ref()) {
                    let text = t.unescape_and_decode(&reader).map_err(util::to_simple)?;
                    f.assign(entry, text);
                }
            }
            Event::End(ref e) => {
                if e.name() == b"item" {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

fn read_enclosure<B: BufRead>(
    e: &BytesStart,
    reader: &Reader<B>,
    current: Option<&mut FeedEntry>,
) -> Result<(), SimpleError> {
    let entry = match current {
        Some(entry) => entry,
        None => return Ok(()),
    };
    for attr in e.attributes() {
        let attr = attr.map_err(util::to_simple)?;
        let value = attr
            .unescape_and_decode_value(reader)
            .map_err(util::to_simple)?;
        match attr.key {
            b"url" => entry.enclosure_url = value,
            b"type" => entry.enclosure_type = Some(value),
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::init_log;
    use log::debug;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example Show</title>
    <description>A show about examples</description>
    <item>
      <title>Episode Two</title>
      <description><![CDATA[Fresh & new <b>stuff</b>]]></description>
      <pubDate>Tue, 10 Mar 2020 12:00:00 +0000</pubDate>
      <enclosure url="http://example.com/ep2.mp3" type="audio/mpeg"/>
    </item>
    <item>
      <title>Episode One &amp; a half</title>
      <description>Older episode</description>
      <pubDate>Tue, 03 Mar 2020 12:00:00 +0000</pubDate>
      <enclosure url="http://example.com/ep1.mp3" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_items_in_feed_order() {
        init_log();
        let entries = parse_entries(FEED.as_bytes()).expect("parse failed");
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.title, "Episode Two");
        assert_eq!(first.description, "Fresh & new <b>stuff</b>");
        assert_eq!(first.pub_date, "Tue, 10 Mar 2020 12:00:00 +0000");
        assert_eq!(first.enclosure_url, "http://example.com/ep2.mp3");
        assert_eq!(first.enclosure_type.as_deref(), Some("audio/mpeg"));

        assert_eq!(entries[1].title, "Episode One & a half");
        debug!("second item {:?}", entries[1]);
    }

    #[test]
    fn channel_fields_do_not_leak_into_items() {
        let entries = parse_entries(FEED.as_bytes()).expect("parse failed");
        assert!(entries.iter().all(|e| e.title != "Example Show"));
    }

    #[test]
    fn empty_channel_is_ok() {
        let xml = r#"<rss version="2.0"><channel><title>Empty</title></channel></rss>"#;
        let entries = parse_entries(xml.as_bytes()).expect("parse failed");
        assert!(entries.is_empty());
    }

    #[test]
    fn malformed_document_is_an_error() {
        let xml = "<rss><channel><item><title>broken</wrong></item></channel></rss>";
        assert!(parse_entries(xml.as_bytes()).is_err());
    }
}
