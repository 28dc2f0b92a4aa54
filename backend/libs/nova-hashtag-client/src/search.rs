//! Exclusion-based hashtag search pagination
//!
//! There is no server cursor: the caller sends back the ids it has already
//! seen, plus the rank token handed out with the first page. The exclusion
//! list travels in the query string, so deep pagination eventually outgrows
//! the transport's header limit. That condition ends the search with an empty
//! page instead of an error.

use tracing::debug;

use crate::errors::Result;
use crate::models::SearchPage;
use crate::transport::{ApiRequest, Transport};
use crate::validation::{validate_numeric_id, validate_query_text, validate_rank_token};

pub(crate) const SEARCH_PATH: &str = "tags/search/";

/// Build one search page request after validating every argument.
pub(crate) fn build_search_request(
    query: &str,
    exclude_ids: &[String],
    rank_token: Option<&str>,
    timezone_offset: i32,
    page_size: u32,
) -> Result<ApiRequest> {
    validate_query_text(query)?;
    for id in exclude_ids {
        validate_numeric_id(id)?;
    }
    if let Some(token) = rank_token {
        validate_rank_token(token)?;
    }

    let mut request = ApiRequest::get(SEARCH_PATH)
        .add_param("q", query)
        .add_param("timezone_offset", timezone_offset)
        .add_param("count", page_size);

    if !exclude_ids.is_empty() {
        request = request.add_param("exclude_list", format!("[{}]", exclude_ids.join(", ")));
    }
    if let Some(token) = rank_token {
        request = request.add_param("rank_token", token);
    }

    Ok(request)
}

/// Dispatch a search request, turning an oversized request into a terminal page.
pub(crate) async fn fetch_search_page<T>(
    transport: &T,
    request: ApiRequest,
    rank_token: Option<&str>,
) -> Result<SearchPage>
where
    T: Transport + ?Sized,
{
    match request.get_response::<SearchPage, _>(transport).await {
        Ok(mut page) => {
            if page.rank_token.is_none() {
                page.rank_token = rank_token.map(str::to_owned);
            }
            Ok(page)
        }
        Err(e) if e.is_headers_too_large() => {
            debug!(error = %e, "Search exclusion list outgrew transport limit, ending search");
            Ok(SearchPage::exhausted(rank_token.map(str::to_owned)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Caller-owned state of one logical search.
///
/// Keeps the rank token from the first page and every id returned so far.
/// Two sessions for the same query never share anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    query: String,
    rank_token: Option<String>,
    exclude_ids: Vec<String>,
    exhausted: bool,
}

impl SearchSession {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            rank_token: None,
            exclude_ids: Vec::new(),
            exhausted: false,
        }
    }

    /// Resume with a rank token obtained earlier
    pub fn with_rank_token(mut self, rank_token: impl Into<String>) -> Self {
        self.rank_token = Some(rank_token.into());
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn rank_token(&self) -> Option<&str> {
        self.rank_token.as_deref()
    }

    pub fn exclude_ids(&self) -> &[String] {
        &self.exclude_ids
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fold a fetched page into the session.
    pub(crate) fn absorb(&mut self, page: &SearchPage) {
        if self.rank_token.is_none() {
            self.rank_token = page.rank_token.clone();
        }

        self.exclude_ids
            .extend(page.result_ids().map(str::to_owned));

        // An empty page can never advance the exclusion list
        if !page.has_more || page.results.is_empty() {
            self.exhausted = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HashtagSummary;

    fn summary(id: &str) -> HashtagSummary {
        HashtagSummary {
            id: id.to_string(),
            name: format!("tag{}", id),
            media_count: 1,
            search_result_subtitle: None,
        }
    }

    #[test]
    fn test_first_page_request() {
        let request = build_search_request("rust", &[], None, 3600, 30).unwrap();

        assert_eq!(request.path, SEARCH_PATH);
        assert_eq!(request.param("q"), Some("rust"));
        assert_eq!(request.param("timezone_offset"), Some("3600"));
        assert_eq!(request.param("count"), Some("30"));
        assert_eq!(request.param("exclude_list"), None);
        assert_eq!(request.param("rank_token"), None);
    }

    #[test]
    fn test_exclusion_list_keeps_order() {
        let ids = vec!["30".to_string(), "10".to_string(), "20".to_string()];
        let request = build_search_request("rust", &ids, Some("tok"), 0, 30).unwrap();

        assert_eq!(request.param("exclude_list"), Some("[30, 10, 20]"));
        assert_eq!(request.param("rank_token"), Some("tok"));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(build_search_request("", &[], None, 0, 30)
            .unwrap_err()
            .is_invalid_argument());
        assert!(build_search_request("rust", &["abc".to_string()], None, 0, 30)
            .unwrap_err()
            .is_invalid_argument());
        assert!(build_search_request("rust", &[], Some(""), 0, 30)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_session_keeps_first_rank_token() {
        let mut session = SearchSession::new("rust");

        session.absorb(&SearchPage {
            results: vec![summary("1"), summary("2")],
            has_more: true,
            rank_token: Some("first".to_string()),
        });
        session.absorb(&SearchPage {
            results: vec![summary("3")],
            has_more: true,
            rank_token: Some("second".to_string()),
        });

        assert_eq!(session.rank_token(), Some("first"));
        assert_eq!(session.exclude_ids(), &["1", "2", "3"]);
        assert!(!session.is_exhausted());
    }

    #[test]
    fn test_session_exhausts_on_last_page() {
        let mut session = SearchSession::new("rust").with_rank_token("tok");
        session.absorb(&SearchPage::exhausted(Some("tok".to_string())));

        assert!(session.is_exhausted());
        assert!(session.exclude_ids().is_empty());
    }
}
