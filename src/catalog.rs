use crate::util;
use serde::Deserialize;
use simple_error::SimpleResult;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Podcast name to feed url map, loaded once at startup and never mutated.
/// Names match exactly, case included. A miss is an expected outcome.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog(HashMap<String, String>);

impl Catalog {
    pub fn from_path(path: impl AsRef<Path>) -> SimpleResult<Self> {
        let file = File::open(path).map_err(util::to_simple)?;
        serde_json::from_reader(file).map_err(util::to_simple)
    }

    pub fn feed_url(&self, podcast_name: &str) -> Option<&str> {
        self.0.get(podcast_name).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for Catalog {
    fn from(map: HashMap<String, String>) -> Self {
        Catalog(map)
    }
}
