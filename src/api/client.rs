//! HTTP client for the Story Spoiler API
//!
//! Login happens once through [`StoryClient::connect`]; every later call
//! carries the bearer token obtained there.

use std::time::Duration;

use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, info};

use crate::common::config::Config;
use crate::common::{Error, Result};

use super::types::{Credentials, StoryPayload, TokenResponse};

const LOGIN_PATH: &str = "/api/User/Authentication";
const CREATE_PATH: &str = "/api/Story/Create";
const EDIT_PATH: &str = "/api/Story/Edit";
const LIST_PATH: &str = "/api/Story/All";
const DELETE_PATH: &str = "/api/Story/Delete";

/// Status and raw body of one response
///
/// The body is kept as text so assertions can look for markers even when
/// the server answers with something that is not JSON.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Authenticated client for the story endpoints
pub struct StoryClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl StoryClient {
    /// Build the HTTP client, log in and keep the issued token
    pub async fn connect(config: &Config) -> Result<Self> {
        let base_url = parse_base_url(&config.target.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;

        let token = authenticate(&http, &base_url, &config.credentials).await?;
        info!(base_url = %base_url, user = %config.credentials.username, "authenticated");

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST /api/Story/Create
    pub async fn create(&self, story: &StoryPayload) -> Result<HttpReply> {
        let url = endpoint(&self.base_url, CREATE_PATH, None)?;
        self.send(Method::POST, url, Some(story)).await
    }

    /// PUT /api/Story/Edit/{id}
    pub async fn edit(&self, id: &str, story: &StoryPayload) -> Result<HttpReply> {
        let url = endpoint(&self.base_url, EDIT_PATH, Some(id))?;
        self.send(Method::PUT, url, Some(story)).await
    }

    /// GET /api/Story/All
    pub async fn list(&self) -> Result<HttpReply> {
        let url = endpoint(&self.base_url, LIST_PATH, None)?;
        self.send::<()>(Method::GET, url, None).await
    }

    /// DELETE /api/Story/Delete/{id}
    pub async fn delete(&self, id: &str) -> Result<HttpReply> {
        let url = endpoint(&self.base_url, DELETE_PATH, Some(id))?;
        self.send::<()>(Method::DELETE, url, None).await
    }

    /// Release the connection pool. Consumes the client so it happens once.
    pub fn close(self) {
        debug!(base_url = %self.base_url, "releasing HTTP client");
        drop(self.http);
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<HttpReply> {
        debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(%method, %url, status = status.as_u16(), "received response");
        Ok(HttpReply { status, body })
    }
}

/// Exchange credentials for a bearer token
///
/// Any status other than 200, or an answer without a non-empty
/// `accessToken`, is fatal for the run.
pub async fn authenticate(
    http: &reqwest::Client,
    base_url: &Url,
    credentials: &Credentials,
) -> Result<String> {
    let url = endpoint(base_url, LOGIN_PATH, None)?;
    debug!(%url, user = %credentials.username, "requesting access token");

    let response = http
        .post(url)
        .json(credentials)
        .send()
        .await
        .map_err(|e| Error::Authentication(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Authentication(e.to_string()))?;

    if status != StatusCode::OK {
        return Err(Error::Authentication(login_rejected(status, &body)));
    }

    let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
        Error::Authentication(format!(
            "login returned {} with a body that is not a token response: {}",
            status, e
        ))
    })?;

    match parsed.access_token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(Error::MissingToken),
    }
}

fn login_rejected(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("login rejected with status {}", status)
    } else {
        format!("login rejected with status {}: {}", status, body)
    }
}

/// Validate and normalise the configured base URL
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::invalid_base_url(raw, e))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_base_url(raw, "expected an http(s) URL"));
    }
    Ok(url)
}

/// Resolve `path` (plus an optional id segment) under the base URL,
/// keeping any path prefix the base URL already has.
fn endpoint(base_url: &Url, path: &str, id: Option<&str>) -> Result<Url> {
    let mut url = base_url.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| Error::invalid_base_url(base_url.as_str(), "cannot hold a path"))?;
        segments.pop_if_empty();
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        if let Some(id) = id {
            segments.push(id);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_to_root() {
        let base = parse_base_url("https://example.test").unwrap();
        let url = endpoint(&base, CREATE_PATH, None).unwrap();
        assert_eq!(url.as_str(), "https://example.test/api/Story/Create");
    }

    #[test]
    fn test_endpoint_keeps_prefix_and_encodes_id() {
        let base = parse_base_url("http://localhost:8080/stage/").unwrap();
        let url = endpoint(&base, EDIT_PATH, Some("a b/c")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/stage/api/Story/Edit/a%20b%2Fc"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_non_http() {
        assert!(matches!(
            parse_base_url("mailto:someone@example.test"),
            Err(Error::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(Error::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_reply_success_class() {
        let created = HttpReply {
            status: StatusCode::CREATED,
            body: String::new(),
        };
        let rejected = HttpReply {
            status: StatusCode::BAD_REQUEST,
            body: String::new(),
        };
        assert!(created.is_success());
        assert!(!rejected.is_success());
    }

    #[test]
    fn test_login_rejection_names_status() {
        let msg = login_rejected(StatusCode::UNAUTHORIZED, r#"{"msg":"Invalid"}"#);
        assert!(msg.contains("401 Unauthorized"));
        assert!(msg.contains("Invalid"));
        assert_eq!(
            login_rejected(StatusCode::FORBIDDEN, "  "),
            "login rejected with status 403 Forbidden"
        );
    }
}
