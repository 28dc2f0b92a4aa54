//! Hashtag API facade

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::config::HashtagClientConfig;
use crate::errors::Result;
use crate::models::*;
use crate::search::{build_search_request, fetch_search_page, SearchSession};
use crate::seen::{ensure_items_from_tray, SeenMarker, TransportSeenMarker};
use crate::transport::{ApiRequest, HttpTransport, Transport};
use crate::validation::{encode_hashtag, validate_numeric_id, validate_rank_token};

/// Hashtag API client
///
/// Stateless between calls: pagination state (rank token, exclusion list)
/// stays with the caller, either passed explicitly or held in a
/// [`SearchSession`].
pub struct HashtagClient<T: ?Sized, S = TransportSeenMarker<T>> {
    transport: Arc<T>,
    seen_marker: S,
    timezone_offset: i32,
    search_page_size: u32,
}

impl HashtagClient<HttpTransport> {
    /// Create a client talking HTTP to `config.base_url`
    pub fn from_config(config: &HashtagClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport + ?Sized> HashtagClient<T> {
    pub fn new(transport: Arc<T>, config: &HashtagClientConfig) -> Self {
        let seen_marker = TransportSeenMarker::new(Arc::clone(&transport));
        Self::with_seen_marker(transport, seen_marker, config)
    }
}

impl<T, S> HashtagClient<T, S>
where
    T: Transport + ?Sized,
    S: SeenMarker,
{
    /// Create a client with a custom "mark seen" delegate
    pub fn with_seen_marker(transport: Arc<T>, seen_marker: S, config: &HashtagClientConfig) -> Self {
        Self {
            transport,
            seen_marker,
            timezone_offset: config.resolve_timezone_offset(),
            search_page_size: config.search_page_size,
        }
    }

    /// Offset sent with every search, fixed when the client was built
    pub fn timezone_offset(&self) -> i32 {
        self.timezone_offset
    }

    /// Get hashtag metadata
    pub async fn get_info(&self, hashtag: &str) -> Result<TagInfo> {
        let tag = encode_hashtag(hashtag)?;
        let info: TagInfo = ApiRequest::get(format!("tags/{}/info/", tag))
            .get_response(self.transport.as_ref())
            .await?;
        Ok(info)
    }

    /// Get the story tray of a hashtag
    pub async fn get_story(&self, hashtag: &str) -> Result<TagStory> {
        let tag = encode_hashtag(hashtag)?;
        let story: TagStory = ApiRequest::get(format!("tags/{}/story/", tag))
            .get_response(self.transport.as_ref())
            .await?;
        Ok(story)
    }

    /// Search hashtags, excluding ids returned by earlier pages.
    ///
    /// `rank_token` must be the token from the first page of this search.
    /// When the exclusion list no longer fits in a request, an empty final
    /// page is returned instead of an error.
    pub async fn search(
        &self,
        query: &str,
        exclude_ids: &[String],
        rank_token: Option<&str>,
    ) -> Result<SearchPage> {
        let request = build_search_request(
            query,
            exclude_ids,
            rank_token,
            self.timezone_offset,
            self.search_page_size,
        )?;

        fetch_search_page(self.transport.as_ref(), request, rank_token).await
    }

    /// Fetch the next page of `session` and fold it back in.
    ///
    /// Returns an empty list without a request once the session is exhausted.
    pub async fn search_next(&self, session: &mut SearchSession) -> Result<Vec<HashtagSummary>> {
        if session.is_exhausted() {
            return Ok(Vec::new());
        }

        let page = self
            .search(session.query(), session.exclude_ids(), session.rank_token())
            .await?;
        session.absorb(&page);

        Ok(page.results)
    }

    /// Get hashtags related to `hashtag`
    pub async fn get_related(&self, hashtag: &str) -> Result<RelatedTags> {
        let tag = encode_hashtag(hashtag)?;
        let visited = json!([{ "id": hashtag, "type": "hashtag" }]);
        let related_types = json!(["hashtag"]);

        let related: RelatedTags = ApiRequest::get(format!("tags/{}/related/", tag))
            .add_param("visited", visited)
            .add_param("related_types", related_types)
            .get_response(self.transport.as_ref())
            .await?;
        Ok(related)
    }

    /// Get the content feed of a hashtag.
    ///
    /// `max_id` is the opaque `next_max_id` of the previous page.
    pub async fn get_feed(
        &self,
        hashtag: &str,
        rank_token: &str,
        max_id: Option<&str>,
    ) -> Result<TagFeed> {
        let tag = encode_hashtag(hashtag)?;
        validate_rank_token(rank_token)?;

        let mut request =
            ApiRequest::get(format!("feed/tag/{}/", tag)).add_param("rank_token", rank_token);
        if let Some(max_id) = max_id {
            request = request.add_param("max_id", max_id);
        }

        let feed: TagFeed = request.get_response(self.transport.as_ref()).await?;
        Ok(feed)
    }

    pub async fn follow(&self, hashtag: &str) -> Result<FollowStatus> {
        let tag = encode_hashtag(hashtag)?;
        let status: FollowStatus = ApiRequest::post(format!("tags/follow/{}/", tag))
            .get_response(self.transport.as_ref())
            .await?;
        Ok(status)
    }

    pub async fn unfollow(&self, hashtag: &str) -> Result<FollowStatus> {
        let tag = encode_hashtag(hashtag)?;
        let status: FollowStatus = ApiRequest::post(format!("tags/unfollow/{}/", tag))
            .get_response(self.transport.as_ref())
            .await?;
        Ok(status)
    }

    /// Hashtags followed by a user
    pub async fn get_following(&self, user_id: &str) -> Result<FollowingTags> {
        validate_numeric_id(user_id)?;
        let tags: FollowingTags = ApiRequest::get(format!("users/{}/following_tags_info/", user_id))
            .get_response(self.transport.as_ref())
            .await?;
        Ok(tags)
    }

    /// Mark story items from a hashtag feed as seen.
    ///
    /// `feed` must be the exact response the items were taken from; every
    /// story tray item is checked against its tray before anything is sent.
    pub async fn mark_story_media_seen(&self, feed: &TagFeed, items: &[Item]) -> Result<SeenResult> {
        let source_id = ensure_items_from_tray(feed, items)?;

        debug!(source_id, items = items.len(), "Marking hashtag story media as seen");
        self.seen_marker.mark_items_seen(items, source_id).await
    }
}
