//! Nova Hashtag Client Library
//!
//! Client-side access to the remote hashtag API: metadata lookup, paginated
//! search with result exclusion, related hashtags, hashtag feeds and marking
//! hashtag story media as seen.
//!
//! It handles:
//! - Argument validation before any request is built
//! - Exclusion-list search pagination, ending cleanly when the list outgrows the transport
//! - Proving story items belong to the tray they are marked seen against
//! - Environment based configuration and a `reqwest` transport

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod search;
pub mod seen;
pub mod transport;
pub mod validation;

pub use client::HashtagClient;
pub use config::HashtagClientConfig;
pub use errors::{HashtagError, Result, TransportError};
pub use models::{
    FollowStatus, FollowingTags, HashtagSummary, Item, RelatedTag, RelatedTags, SearchPage,
    SeenResult, StoryItem, StoryTray, TagFeed, TagInfo, TagStory,
};
pub use search::SearchSession;
pub use seen::{ensure_items_from_tray, SeenMarker, TransportSeenMarker};
pub use transport::{ApiRequest, HttpMethod, HttpTransport, Transport};
pub use validation::generate_rank_token;
