//! In-process stand-in for the Story Spoiler API
//!
//! Serves the same routes, status codes and message markers as the real
//! service on an ephemeral localhost port, with switches for the failure
//! modes the runner has to report.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use story_contract::api::types::Credentials;
use story_contract::common::config::TargetConfig;
use story_contract::Config;

pub const USERNAME: &str = "tester";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "test-token";

type Reply = (StatusCode, Json<Value>);

/// Ways the fake can misbehave
#[derive(Clone, Copy, Default)]
pub struct Faults {
    /// Login answers 200 without an access token
    pub no_token: bool,
    /// Every create answers 500
    pub broken_create: bool,
    /// Delete confirms but keeps the story
    pub sticky_delete: bool,
    /// Create answers 201 even when title and description are missing
    pub accept_incomplete_create: bool,
    /// Create succeeds with 201 but a different confirmation message
    pub create_wrong_message: bool,
    /// Edit of a known story answers 200 with a different message
    pub edit_wrong_message: bool,
    /// Delete of a known story answers 200 with a different message
    pub delete_wrong_message: bool,
    /// Edit of an unknown id answers 404 without the "No spoilers..." text
    pub edit_missing_wrong_marker: bool,
    /// Edit of an unknown id answers 200
    pub edit_missing_ok: bool,
    /// Delete of an unknown id answers 404 instead of 400
    pub delete_missing_not_found: bool,
    /// Delete of an unknown id answers 400 without the rejection text
    pub delete_missing_wrong_marker: bool,
}

#[derive(Default)]
struct Store {
    next_id: u64,
    stories: BTreeMap<String, Value>,
}

#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<Store>>,
    faults: Faults,
}

/// A running fake API; shuts down on drop
pub struct FakeStoryApi {
    pub base_url: String,
    store: Arc<Mutex<Store>>,
    server: tokio::task::JoinHandle<()>,
}

impl FakeStoryApi {
    pub async fn spawn() -> Self {
        Self::spawn_with(Faults::default()).await
    }

    pub async fn spawn_with(faults: Faults) -> Self {
        let store = Arc::new(Mutex::new(Store::default()));
        let state = AppState {
            store: store.clone(),
            faults,
        };

        let app = Router::new()
            .route("/api/User/Authentication", post(login))
            .route("/api/Story/Create", post(create_story))
            .route("/api/Story/Edit/{id}", put(edit_story))
            .route("/api/Story/All", get(list_stories))
            .route("/api/Story/Delete/{id}", delete(delete_story))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake API listener");
        let addr = listener.local_addr().expect("Failed to read listener address");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake API server failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            store,
            server,
        }
    }

    /// Runner configuration pointing at this server with valid credentials
    pub fn config(&self) -> Config {
        let mut config = Config {
            target: TargetConfig {
                base_url: self.base_url.clone(),
            },
            credentials: Credentials {
                username: USERNAME.to_string(),
                password: PASSWORD.to_string(),
            },
            ..Config::default()
        };
        config.timeouts.request_secs = 5;
        config.timeouts.connect_secs = 5;
        config
    }

    pub fn story_count(&self) -> usize {
        self.store.lock().expect("store poisoned").stories.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store
            .lock()
            .expect("store poisoned")
            .stories
            .contains_key(id)
    }

    /// Insert a story directly, bypassing the API
    pub fn seed(&self, title: &str) -> String {
        let mut store = self.store.lock().expect("store poisoned");
        insert(&mut store, json!({"title": title, "description": "seeded", "url": ""}))
    }
}

impl Drop for FakeStoryApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn insert(store: &mut Store, mut story: Value) -> String {
    store.next_id += 1;
    let id = format!("story-{:04}", store.next_id);
    story["id"] = json!(id);
    store.stories.insert(id.clone(), story);
    id
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Reply {
    (StatusCode::UNAUTHORIZED, Json(json!({"msg": "Unauthorized"})))
}

fn non_empty(body: &Value, field: &str) -> bool {
    body.get(field)
        .and_then(Value::as_str)
        .map(|s| !s.is_empty())
        .unwrap_or(false)
}

async fn login(State(state): State<AppState>, Json(body): Json<Value>) -> Reply {
    let valid = body.get("username").and_then(Value::as_str) == Some(USERNAME)
        && body.get("password").and_then(Value::as_str) == Some(PASSWORD);

    if !valid {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"msg": "Invalid username or password"})),
        );
    }
    if state.faults.no_token {
        return (StatusCode::OK, Json(json!({"username": USERNAME})));
    }
    (
        StatusCode::OK,
        Json(json!({"username": USERNAME, "accessToken": TOKEN})),
    )
}

async fn create_story(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    if state.faults.broken_create {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"msg": "Something went wrong"})),
        );
    }
    let complete = non_empty(&body, "title") && non_empty(&body, "description");
    if !complete && !state.faults.accept_incomplete_create {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"msg": "Title and description are required"})),
        );
    }

    let mut store = state.store.lock().expect("store poisoned");
    let id = insert(&mut store, body);
    let msg = if state.faults.create_wrong_message {
        "Story saved"
    } else {
        "Successfully created!"
    };
    (StatusCode::CREATED, Json(json!({"msg": msg, "storyId": id})))
}

async fn edit_story(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }

    let mut store = state.store.lock().expect("store poisoned");
    match store.stories.get_mut(&id) {
        Some(story) => {
            body["id"] = json!(id);
            *story = body;
            let msg = if state.faults.edit_wrong_message {
                "Story updated"
            } else {
                "Successfully edited"
            };
            (StatusCode::OK, Json(json!({"msg": msg})))
        }
        None if state.faults.edit_missing_ok => {
            (StatusCode::OK, Json(json!({"msg": "Successfully edited"})))
        }
        None if state.faults.edit_missing_wrong_marker => {
            (StatusCode::NOT_FOUND, Json(json!({"msg": "Not found"})))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"msg": "No spoilers..."}))),
    }
}

async fn list_stories(State(state): State<AppState>, headers: HeaderMap) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }

    let store = state.store.lock().expect("store poisoned");
    let stories: Vec<Value> = store.stories.values().cloned().collect();
    (StatusCode::OK, Json(Value::Array(stories)))
}

async fn delete_story(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }

    let mut store = state.store.lock().expect("store poisoned");
    if !store.stories.contains_key(&id) {
        let status = if state.faults.delete_missing_not_found {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };
        let msg = if state.faults.delete_missing_wrong_marker {
            "Bad request"
        } else {
            "Unable to delete this story spoiler!"
        };
        return (status, Json(json!({"msg": msg})));
    }
    if !state.faults.sticky_delete {
        store.stories.remove(&id);
    }
    let msg = if state.faults.delete_wrong_message {
        "Story removed"
    } else {
        "Deleted successfully!"
    };
    (StatusCode::OK, Json(json!({"msg": msg})))
}
