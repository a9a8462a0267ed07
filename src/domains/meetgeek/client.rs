//! HTTP client for the MeetGeek REST API.
//!
//! Every operation maps one-to-one onto a `/v1` endpoint and hands back the
//! upstream JSON untouched. The API key is supplied per call so a single
//! client (and its connection pool) can serve many sessions.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::{ApiError, ApiResult};
use super::types::{Pagination, UploadRecording};
use crate::core::config::UpstreamConfig;

/// API version prefix appended to the configured base URL.
const API_VERSION: &str = "v1";

/// Operations exposed by the upstream meeting API.
///
/// Tools talk to this trait rather than to [`MeetGeekClient`] directly.
#[async_trait]
pub trait MeetingsApi: Send + Sync {
    /// `GET /v1/meetings`
    async fn list_meetings(&self, api_key: &str, page: &Pagination) -> ApiResult<Value>;

    /// `GET /v1/meetings/{meeting_id}`
    async fn meeting_details(&self, api_key: &str, meeting_id: &str) -> ApiResult<Value>;

    /// `GET /v1/meetings/{meeting_id}/transcript`
    async fn transcript(
        &self,
        api_key: &str,
        meeting_id: &str,
        page: &Pagination,
    ) -> ApiResult<Value>;

    /// `GET /v1/meetings/{meeting_id}/highlights`
    async fn highlights(&self, api_key: &str, meeting_id: &str) -> ApiResult<Value>;

    /// `GET /v1/meetings/{meeting_id}/summary`
    async fn summary(&self, api_key: &str, meeting_id: &str) -> ApiResult<Value>;

    /// `GET /v1/teams/{team_id}/meetings`
    async fn team_meetings(
        &self,
        api_key: &str,
        team_id: &str,
        page: &Pagination,
    ) -> ApiResult<Value>;

    /// `POST /v1/upload`
    async fn upload_recording(
        &self,
        api_key: &str,
        upload: &UploadRecording,
    ) -> ApiResult<Value>;
}

/// reqwest-backed implementation of [`MeetingsApi`].
#[derive(Debug, Clone)]
pub struct MeetGeekClient {
    http: Client,
    base_url: Url,
}

impl MeetGeekClient {
    /// Build a client for the configured base URL and timeout.
    pub fn new(config: &UpstreamConfig) -> ApiResult<Self> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(config.base_url.clone()));
        }
        base_url.set_query(None);
        base_url.set_fragment(None);

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The base URL requests are built from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/v1/<segments...>`, encoding each segment on its own.
    ///
    /// Empty, `.` and `..` segments are rejected: the URL parser would drop
    /// or resolve them and the request would land on another resource.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| matches!(**s, "" | "." | ".."))
        {
            return Err(ApiError::InvalidPathSegment(bad.to_string()));
        }

        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty().push(API_VERSION).extend(segments);
        }
        Ok(url)
    }

    async fn get(
        &self,
        api_key: &str,
        segments: &[&str],
        page: Option<&Pagination>,
    ) -> ApiResult<Value> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "GET request");

        let mut request = self.http.get(url).bearer_auth(api_key);
        if let Some(page) = page.filter(|p| !p.is_empty()) {
            request = request.query(page);
        }
        self.send(request).await
    }

    async fn post(&self, api_key: &str, segments: &[&str], body: &Value) -> ApiResult<Value> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, "POST request");

        let request = self.http.post(url).bearer_auth(api_key).json(body);
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        let is_json = is_json_response(&response);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::status(status.as_u16(), &body));
        }

        parse_body(&body, is_json)
    }
}

#[async_trait]
impl MeetingsApi for MeetGeekClient {
    async fn list_meetings(&self, api_key: &str, page: &Pagination) -> ApiResult<Value> {
        self.get(api_key, &["meetings"], Some(page)).await
    }

    async fn meeting_details(&self, api_key: &str, meeting_id: &str) -> ApiResult<Value> {
        self.get(api_key, &["meetings", meeting_id], None).await
    }

    async fn transcript(
        &self,
        api_key: &str,
        meeting_id: &str,
        page: &Pagination,
    ) -> ApiResult<Value> {
        self.get(api_key, &["meetings", meeting_id, "transcript"], Some(page))
            .await
    }

    async fn highlights(&self, api_key: &str, meeting_id: &str) -> ApiResult<Value> {
        self.get(api_key, &["meetings", meeting_id, "highlights"], None)
            .await
    }

    async fn summary(&self, api_key: &str, meeting_id: &str) -> ApiResult<Value> {
        self.get(api_key, &["meetings", meeting_id, "summary"], None)
            .await
    }

    async fn team_meetings(
        &self,
        api_key: &str,
        team_id: &str,
        page: &Pagination,
    ) -> ApiResult<Value> {
        self.get(api_key, &["teams", team_id, "meetings"], Some(page))
            .await
    }

    async fn upload_recording(
        &self,
        api_key: &str,
        upload: &UploadRecording,
    ) -> ApiResult<Value> {
        let body = serde_json::to_value(upload)?;
        self.post(api_key, &["upload"], &body).await
    }
}

fn is_json_response(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("json"))
        .unwrap_or(false)
}

/// Interpret a success body: empty is `null`, JSON is parsed, anything else
/// is carried through as a string.
fn parse_body(body: &str, is_json: bool) -> ApiResult<Value> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    if is_json {
        return Ok(serde_json::from_str(trimmed)?);
    }
    Ok(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(body.to_string())))
}
