//! Marking hashtag story media as seen
//!
//! Seen state is keyed server-side by (item id, source tray id). Before the
//! delegate is called, every tray item must be proven to come from the tray
//! of the feed response the caller passes in.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde_json::{json, Map, Value};

use crate::errors::{HashtagError, Result};
use crate::models::{Item, SeenResult, StoryItem, TagFeed};
use crate::transport::{ApiRequest, Transport};

/// Records seen state for items attributed to `source_id`.
#[async_trait]
pub trait SeenMarker: Send + Sync {
    async fn mark_items_seen(&self, items: &[Item], source_id: &str) -> Result<SeenResult>;
}

/// Check that every tray item in `items` belongs to `feed`'s story tray.
///
/// Returns the tray id to attribute the seen state to. `Item::Other` entries
/// are left for the delegate to reject.
pub fn ensure_items_from_tray<'a>(feed: &'a TagFeed, items: &[Item]) -> Result<&'a str> {
    let tray = feed
        .story
        .as_ref()
        .filter(|tray| !tray.id.is_empty())
        .ok_or_else(|| HashtagError::invalid("response has no story-tray id"))?;

    let valid_ids: HashSet<&str> = tray.items.iter().map(|item| item.id.as_str()).collect();

    for item in items {
        if let Item::TrayItem(story_item) = item {
            if !valid_ids.contains(story_item.id.as_str()) {
                return Err(HashtagError::invalid(format!(
                    "item {} is not part of story tray {}",
                    story_item.id, tray.id
                )));
            }
        }
    }

    Ok(tray.id.as_str())
}

/// Default delegate: posts `media/seen/` through a [`Transport`].
pub struct TransportSeenMarker<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: Transport + ?Sized> TransportSeenMarker<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: Transport + ?Sized> SeenMarker for TransportSeenMarker<T> {
    async fn mark_items_seen(&self, items: &[Item], source_id: &str) -> Result<SeenResult> {
        if items.is_empty() {
            return Err(HashtagError::invalid("no items to mark as seen"));
        }

        let story_items = items
            .iter()
            .map(|item| match item {
                Item::TrayItem(story_item) => Ok(story_item),
                Item::Other(_) => Err(HashtagError::invalid(
                    "only story tray items can be marked as seen",
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        let reels = {
            let mut rng = rand::thread_rng();
            build_reels(&story_items, source_id, Utc::now().timestamp(), &mut rng)
        };

        let result: SeenResult = ApiRequest::post("media/seen/")
            .add_param("reels", Value::Object(reels))
            .add_param("reel", 1)
            .add_param("live_vod", 0)
            .get_response(self.transport.as_ref())
            .await?;

        Ok(result)
    }
}

/// `{item_id}_{source_id}` -> `["{taken_at}_{seen_at}"]`. Seen times step
/// forward per item, stay clear of `taken_at` and are capped at `now`.
fn build_reels<R: Rng>(
    items: &[&StoryItem],
    source_id: &str,
    now: i64,
    rng: &mut R,
) -> Map<String, Value> {
    let mut reels = Map::new();
    let mut seen_at = now - 3 * items.len() as i64;

    for item in items {
        if seen_at < item.taken_at + 2 {
            seen_at = item.taken_at + 2;
        }
        if seen_at > now {
            seen_at = now;
        }

        reels.insert(
            format!("{}_{}", item.id, source_id),
            json!([format!("{}_{}", item.taken_at, seen_at)]),
        );

        seen_at += rng.gen_range(1..=3);
    }

    reels
}
