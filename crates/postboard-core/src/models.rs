//! Data models for Postboard
//!
//! Defines the persisted structures (`Post`, `Document`) and the
//! request/response shapes built on top of them (`NewPost`, `PostFilter`,
//! `Snapshot`). Field names are camelCase on the wire so the data file stays
//! compatible with existing boards.

use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A single message-board entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier, assigned from the document counter
    pub id: u64,
    /// Name of the poster
    pub author: String,
    /// Short subject line
    pub subject: String,
    /// Message body
    pub message: String,
    /// When this post was created; never changes afterwards
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Like toggle
    pub liked: bool,
}

impl Post {
    /// Formatted calendar date of `created_at` (`YYYY-MM-DD`, UTC)
    pub fn created_date(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }

    /// Formatted hour and minute of `created_at` (`HH:MM`, UTC)
    pub fn created_time(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}

/// The full persisted board: every post plus the id counter
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Posts in insertion order
    pub posts: Vec<Post>,
    /// Last id handed out. Never decremented, so ids are not reused.
    pub last_id: u64,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a post built from already validated fields.
    ///
    /// Bumps `last_id` and uses the new value as the post id.
    pub fn add_post(
        &mut self,
        author: String,
        subject: String,
        message: String,
        created_at: DateTime<Utc>,
    ) -> Post {
        self.last_id += 1;
        let post = Post {
            id: self.last_id,
            author,
            subject,
            message,
            created_at,
            liked: false,
        };
        self.posts.push(post.clone());
        post
    }

    /// Find a post by id
    pub fn find(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Find a post by id for mutation
    pub fn find_mut(&mut self, id: u64) -> Option<&mut Post> {
        self.posts.iter_mut().find(|post| post.id == id)
    }

    /// Remove a post by id, returning it if it existed
    pub fn remove(&mut self, id: u64) -> Option<Post> {
        let index = self.posts.iter().position(|post| post.id == id)?;
        Some(self.posts.remove(index))
    }

    /// Check that post ids are unique and none is above `last_id`.
    ///
    /// Returns a description of the first violation found.
    pub fn check_ids(&self) -> Result<(), String> {
        let mut seen = HashSet::with_capacity(self.posts.len());
        for post in &self.posts {
            if post.id > self.last_id {
                return Err(format!(
                    "post id {} is above lastId {}",
                    post.id, self.last_id
                ));
            }
            if !seen.insert(post.id) {
                return Err(format!("duplicate post id {}", post.id));
            }
        }
        Ok(())
    }
}

/// Input for creating a post
///
/// Fields are optional so that a missing field can be reported as a
/// validation error instead of a body decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPost {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewPost {
    pub fn new(
        author: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            author: Some(author.into()),
            subject: Some(subject.into()),
            message: Some(message.into()),
        }
    }
}

/// Optional predicates for listing posts
///
/// All provided predicates must match. Empty strings count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostFilter {
    /// Case-insensitive substring of the author name
    #[serde(default)]
    pub author: Option<String>,
    /// Creation date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    /// Creation time, `HH:MM`
    #[serde(default)]
    pub time: Option<String>,
}

impl PostFilter {
    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Self::default()
        }
    }

    pub fn by_date(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    pub fn by_time(time: impl Into<String>) -> Self {
        Self {
            time: Some(time.into()),
            ..Self::default()
        }
    }

    /// True when no predicate is set
    pub fn is_empty(&self) -> bool {
        non_empty(&self.author).is_none()
            && non_empty(&self.date).is_none()
            && non_empty(&self.time).is_none()
    }

    /// Check a post against every provided predicate
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(author) = non_empty(&self.author) {
            if !post
                .author
                .to_lowercase()
                .contains(&author.to_lowercase())
            {
                return false;
            }
        }

        if let Some(date) = non_empty(&self.date) {
            if post.created_date() != date {
                return false;
            }
        }

        if let Some(time) = non_empty(&self.time) {
            if post.created_time() != time {
                return false;
            }
        }

        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Aggregate figures attached to an export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_posts: usize,
    pub liked_posts: usize,
    /// Distinct author strings, compared case-sensitively
    pub unique_authors: usize,
    #[serde(with = "timestamp")]
    pub exported_at: DateTime<Utc>,
}

impl Statistics {
    pub fn from_document(document: &Document, exported_at: DateTime<Utc>) -> Self {
        let unique_authors = document
            .posts
            .iter()
            .map(|post| post.author.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_posts: document.posts.len(),
            liked_posts: document.posts.iter().filter(|post| post.liked).count(),
            unique_authors,
            exported_at,
        }
    }
}

/// Read-only export view: the document plus statistics. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(flatten)]
    pub document: Document,
    pub statistics: Statistics,
}

impl Snapshot {
    pub fn new(document: Document, exported_at: DateTime<Utc>) -> Self {
        let statistics = Statistics::from_document(&document, exported_at);
        Self {
            document,
            statistics,
        }
    }
}

/// Current time truncated to what the data file can represent
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, h, m, 0).unwrap()
    }

    fn post(id: u64, author: &str, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            author: author.to_string(),
            subject: "Subject".to_string(),
            message: "Message body".to_string(),
            created_at,
            liked: false,
        }
    }

    #[test]
    fn test_add_post_assigns_next_id() {
        let mut doc = Document::new();
        let first = doc.add_post("Al".into(), "Hey".into(), "Hello".into(), at(9, 0));
        let second = doc.add_post("Bo".into(), "Yo".into(), "Hi!!!".into(), at(9, 1));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(doc.last_id, 2);
        assert!(!first.liked);
        assert_eq!(doc.posts.len(), 2);
    }

    #[test]
    fn test_remove_keeps_counter() {
        let mut doc = Document::new();
        doc.add_post("Al".into(), "Hey".into(), "Hello".into(), at(9, 0));
        let removed = doc.remove(1).unwrap();

        assert_eq!(removed.id, 1);
        assert!(doc.posts.is_empty());
        assert_eq!(doc.last_id, 1);
        assert!(doc.remove(1).is_none());
    }

    #[test]
    fn test_check_ids() {
        let mut doc = Document::new();
        doc.add_post("Al".into(), "Hey".into(), "Hello".into(), at(9, 0));
        doc.add_post("Bo".into(), "Yo!".into(), "Hi!!!".into(), at(9, 1));
        doc.remove(1);
        assert!(doc.check_ids().is_ok());

        let behind = Document {
            posts: vec![post(5, "Anna", at(9, 0))],
            last_id: 0,
        };
        assert!(behind.check_ids().unwrap_err().contains("above lastId"));

        let duplicated = Document {
            posts: vec![post(2, "Anna", at(9, 0)), post(2, "Bob", at(9, 1))],
            last_id: 2,
        };
        assert!(duplicated.check_ids().unwrap_err().contains("duplicate"));
    }

    #[test]
    fn test_filter_author_case_insensitive() {
        let filter = PostFilter::by_author("ann");
        assert!(filter.matches(&post(1, "Anna", at(10, 0))));
        assert!(filter.matches(&post(2, "JOANNE", at(10, 0))));
        assert!(!filter.matches(&post(3, "Bob", at(10, 0))));
    }

    #[test]
    fn test_filter_date_and_time() {
        let p = post(1, "Anna", at(14, 5));

        assert!(PostFilter::by_date("2025-03-14").matches(&p));
        assert!(!PostFilter::by_date("2025-03-15").matches(&p));
        assert!(PostFilter::by_time("14:05").matches(&p));
        assert!(!PostFilter::by_time("14:06").matches(&p));
    }

    #[test]
    fn test_filter_requires_all_predicates() {
        let p = post(1, "Anna", at(14, 5));
        let filter = PostFilter {
            author: Some("ann".into()),
            date: Some("2025-03-14".into()),
            time: Some("09:00".into()),
        };
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_empty_filter_strings_are_ignored() {
        let filter = PostFilter {
            author: Some(String::new()),
            date: Some(String::new()),
            time: None,
        };
        assert!(filter.is_empty());
        assert!(filter.matches(&post(1, "Anyone", at(1, 2))));
    }

    #[test]
    fn test_statistics() {
        let mut doc = Document::new();
        for author in ["A", "b", "A"] {
            doc.add_post(author.into(), "Sub".into(), "Hello".into(), at(8, 0));
        }
        doc.posts[0].liked = true;

        let stats = Statistics::from_document(&doc, at(12, 0));
        assert_eq!(stats.total_posts, 3);
        assert_eq!(stats.liked_posts, 1);
        assert_eq!(stats.unique_authors, 2);
    }

    #[test]
    fn test_unique_authors_case_sensitive() {
        let mut doc = Document::new();
        for author in ["anna", "Anna"] {
            doc.add_post(author.into(), "Sub".into(), "Hello".into(), at(8, 0));
        }
        assert_eq!(Statistics::from_document(&doc, at(9, 0)).unique_authors, 2);
    }

    #[test]
    fn test_post_wire_format() {
        let p = post(7, "Anna", Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
        let value = serde_json::to_value(&p).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["createdAt"], "2025-01-02T03:04:05.000Z");
        assert_eq!(value["liked"], false);
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_document_ignores_unknown_keys() {
        let json = r#"{
            "posts": [],
            "lastId": 4,
            "meta": { "created": "2025-01-01T00:00:00.000Z", "totalPosts": 0 }
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.last_id, 4);
        assert!(doc.posts.is_empty());
    }

    #[test]
    fn test_document_requires_counter() {
        let result = serde_json::from_str::<Document>(r#"{ "posts": [] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_flattens_document() {
        let mut doc = Document::new();
        doc.add_post("Al".into(), "Hey".into(), "Hello".into(), at(9, 0));

        let value = serde_json::to_value(Snapshot::new(doc, at(10, 0))).unwrap();
        assert_eq!(value["lastId"], 1);
        assert_eq!(value["posts"].as_array().unwrap().len(), 1);
        assert_eq!(value["statistics"]["totalPosts"], 1);
        assert_eq!(value["statistics"]["exportedAt"], "2025-03-14T10:00:00.000Z");
    }

    #[test]
    fn test_now_has_millisecond_precision() {
        let ts = now();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
