//! Hashtag API response and request models

use serde::{Deserialize, Deserializer, Serialize};

/// Ids come back as JSON numbers from some endpoints and strings from others.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Num(u64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Str(s)) => s,
        Some(RawId::Num(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Hashtag metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagInfo {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub media_count: i64,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub following: Option<bool>,
    #[serde(default)]
    pub allow_following: Option<bool>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

/// One hashtag in a search page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagSummary {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub media_count: i64,
    #[serde(default)]
    pub search_result_subtitle: Option<String>,
}

/// One page of an exclusion-paginated hashtag search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<HashtagSummary>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub rank_token: Option<String>,
}

impl SearchPage {
    /// Terminal page carrying the caller's rank token
    pub fn exhausted(rank_token: Option<String>) -> Self {
        Self {
            results: Vec::new(),
            has_more: false,
            rank_token,
        }
    }

    /// Ids to append to the exclusion list for the next page
    pub fn result_ids(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|tag| tag.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedTag {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedTags {
    #[serde(default)]
    pub related: Vec<RelatedTag>,
}

/// Ephemeral media inside a story tray
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub taken_at: i64,
    #[serde(default)]
    pub media_type: Option<i32>,
}

impl StoryItem {
    pub fn new(id: impl Into<String>, taken_at: i64) -> Self {
        Self {
            id: id.into(),
            taken_at,
            media_type: None,
        }
    }
}

/// Story items tied to a hashtag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryTray {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub items: Vec<StoryItem>,
    #[serde(default)]
    pub expiring_at: Option<i64>,
    #[serde(default)]
    pub seen: Option<i64>,
}

/// Hashtag-scoped content feed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TagFeed {
    #[serde(default)]
    pub ranked_items: Vec<serde_json::Value>,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub story: Option<StoryTray>,
    #[serde(default)]
    pub more_available: bool,
    #[serde(default)]
    pub next_max_id: Option<String>,
    #[serde(default)]
    pub num_results: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagStory {
    #[serde(default)]
    pub story: Option<StoryTray>,
}

/// Items a caller asks to mark as seen.
///
/// Only `TrayItem`s are checked against the source tray.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    TrayItem(StoryItem),
    Other(serde_json::Value),
}

impl From<StoryItem> for Item {
    fn from(item: StoryItem) -> Self {
        Item::TrayItem(item)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeenResult {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowingTags {
    #[serde(default)]
    pub tags: Vec<TagInfo>,
}
