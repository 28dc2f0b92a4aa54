//! Argument checks that run before any request is built.

use crate::errors::{HashtagError, Result};

/// Hashtag text: letters, digits and `_` only, no leading `#`.
pub fn validate_hashtag_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(HashtagError::invalid("hashtag must not be empty"));
    }

    if let Some(bad) = text
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '_'))
    {
        return Err(HashtagError::invalid(format!(
            "hashtag {:?} contains disallowed character {:?}",
            text, bad
        )));
    }

    Ok(())
}

/// Validate a hashtag and return it percent-encoded for use in a path segment.
pub fn encode_hashtag(text: &str) -> Result<String> {
    validate_hashtag_text(text)?;
    Ok(urlencoding::encode(text).into_owned())
}

pub fn validate_rank_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(HashtagError::invalid("rank token must not be empty"));
    }

    if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(HashtagError::invalid(format!(
            "rank token {:?} is malformed",
            token
        )));
    }

    Ok(())
}

/// Free-text search only needs something to search for.
pub fn validate_query_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(HashtagError::invalid("search query must not be empty"));
    }
    Ok(())
}

/// Numeric entity id, as used by exclusion lists and user ids.
pub fn validate_numeric_id(id: &str) -> Result<()> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HashtagError::invalid(format!("{:?} is not a numeric id", id)));
    }
    Ok(())
}

/// Fresh rank token for a new paginated session
pub fn generate_rank_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashtag_text() {
        assert!(validate_hashtag_text("rust").is_ok());
        assert!(validate_hashtag_text("rust_lang2024").is_ok());
        assert!(validate_hashtag_text("東京").is_ok());

        assert!(validate_hashtag_text("").is_err());
        assert!(validate_hashtag_text("#rust").is_err());
        assert!(validate_hashtag_text("rust lang").is_err());
        assert!(validate_hashtag_text("rust/../admin").is_err());
    }

    #[test]
    fn test_encode_hashtag_non_ascii() {
        assert_eq!(encode_hashtag("café").unwrap(), "caf%C3%A9");
        assert_eq!(encode_hashtag("東京").unwrap(), "%E6%9D%B1%E4%BA%AC");
        assert_eq!(encode_hashtag("plain").unwrap(), "plain");
        assert!(encode_hashtag("#nope").is_err());
    }

    #[test]
    fn test_rank_token() {
        assert!(validate_rank_token(&generate_rank_token()).is_ok());
        assert!(validate_rank_token("opaque-token").is_ok());

        assert!(validate_rank_token("").is_err());
        assert!(validate_rank_token("has space").is_err());
        assert!(validate_rank_token("line\nbreak").is_err());
    }

    #[test]
    fn test_query_text_is_looser_than_hashtag() {
        assert!(validate_query_text("#rust lang").is_ok());
        assert!(validate_query_text("").is_err());
    }

    #[test]
    fn test_numeric_id() {
        assert!(validate_numeric_id("17841562498105353").is_ok());
        assert!(validate_numeric_id("").is_err());
        assert!(validate_numeric_id("12a").is_err());
        assert!(validate_numeric_id("-1").is_err());
    }
}
