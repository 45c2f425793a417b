#[derive(Debug, PartialEq, Clone, Default)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
    pub pub_date: String,
    pub enclosure_url: String,
    pub enclosure_type: Option<String>,
}
