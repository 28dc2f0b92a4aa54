//! Request building and dispatch
//!
//! [`ApiRequest`] collects a relative path and ordered parameters; a
//! [`Transport`] sends it and hands back the JSON body. [`HttpTransport`]
//! is the `reqwest` implementation used in production.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::HashtagClientConfig;
use crate::errors::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Outbound call against a path relative to the API base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn add_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// First value attached under `name`
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Dispatch through `transport` and decode the body into `T`
    pub async fn get_response<T, R>(self, transport: &R) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
        R: Transport + ?Sized,
    {
        let body = transport.send(&self).await?;
        serde_json::from_value(body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Sends an [`ApiRequest`] and returns the raw JSON response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<serde_json::Value, TransportError>;
}

/// `reqwest` backed transport
pub struct HttpTransport {
    http_client: reqwest::Client,
    base_url: Url,
    user_agent: String,
    access_token: Option<String>,
    max_header_bytes: usize,
}

impl HttpTransport {
    pub fn new(config: &HashtagClientConfig) -> Result<Self, TransportError> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| TransportError::Http(format!("Invalid base URL {}: {}", base, e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
            user_agent: config.user_agent.clone(),
            access_token: config.access_token.clone(),
            max_header_bytes: config.max_header_bytes,
        })
    }

    fn resolve(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| TransportError::Http(format!("Invalid path {}: {}", request.path, e)))?;

        if request.method == HttpMethod::Get && !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(request.params.iter());
        }

        Ok(url)
    }

    /// Approximate size of the request line and headers as sent on the wire
    fn header_size(&self, method: HttpMethod, url: &Url) -> usize {
        let target = url.path().len() + url.query().map(|q| q.len() + 1).unwrap_or(0);
        let host = url.host_str().map(str::len).unwrap_or(0);

        let mut size = method.as_str().len() + 1 + target + " HTTP/1.1\r\n".len();
        size += "Host: \r\n".len() + host;
        size += "User-Agent: \r\n".len() + self.user_agent.len();
        size += "Accept: */*\r\n".len();
        if let Some(token) = &self.access_token {
            size += "Authorization: Bearer \r\n".len() + token.len();
        }
        size + 2
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<serde_json::Value, TransportError> {
        let url = self.resolve(request)?;

        let size = self.header_size(request.method, &url);
        if size > self.max_header_bytes {
            return Err(TransportError::HeadersTooLarge {
                size,
                limit: self.max_header_bytes,
            });
        }

        debug!(
            method = request.method.as_str(),
            path = %request.path,
            params = request.params.len(),
            "Dispatching hashtag API request"
        );

        let mut builder = match request.method {
            HttpMethod::Get => self.http_client.get(url),
            HttpMethod::Post => self.http_client.post(url).form(&request.params),
        };
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        match response.status() {
            StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE | StatusCode::URI_TOO_LONG => {
                Err(TransportError::HeadersTooLarge {
                    size,
                    limit: self.max_header_bytes,
                })
            }
            status if status.is_success() => {
                let body: serde_json::Value = response
                    .json()
                    .await
                    .map_err(|e| TransportError::Decode(e.to_string()))?;

                if body.get("status").and_then(|s| s.as_str()) == Some("fail") {
                    let message = body
                        .get("message")
                        .and_then(|m| m.as_str())
                        .unwrap_or("Unknown error")
                        .to_string();
                    return Err(TransportError::Api { message });
                }

                Ok(body)
            }
            status => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());

                Err(TransportError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
