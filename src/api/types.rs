//! Request and response bodies of the Story Spoiler API

use serde::{Deserialize, Serialize};

/// Login request body
///
/// Missing fields fall back to the built-in test account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Login response; only the token is read
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: Option<String>,
}

/// Body for create and edit requests
///
/// Absent fields serialize as `null`, which is how the server is told a
/// required field is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl StoryPayload {
    /// A payload with every field set
    pub fn new(title: &str, description: &str, url: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            url: Some(url.to_string()),
        }
    }

    /// A payload carrying only `url`, missing both required fields
    pub fn url_only(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Self::default()
        }
    }
}

/// Message envelope returned by create, edit and delete
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiMessage {
    pub msg: Option<String>,
    #[serde(rename = "storyId")]
    pub story_id: Option<String>,
}

/// One entry of the `/api/Story/All` listing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Story {
    #[serde(default, alias = "storyId")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}
