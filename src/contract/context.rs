//! State threaded through the ordered steps of one run

use crate::api::StoryClient;
use crate::common::config::Fixtures;
use crate::common::{Error, Result};

/// Mutable run state handed to each step in turn
pub struct RunContext {
    client: StoryClient,
    fixtures: Fixtures,
    created_story_id: Option<String>,
    deleted_story_id: Option<String>,
}

impl RunContext {
    pub fn new(client: StoryClient, fixtures: Fixtures) -> Self {
        Self {
            client,
            fixtures,
            created_story_id: None,
            deleted_story_id: None,
        }
    }

    pub fn client(&self) -> &StoryClient {
        &self.client
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// Record the id returned by the create step
    pub fn remember_created(&mut self, id: String) {
        self.created_story_id = Some(id);
    }

    /// Id of the story created in this run, or a precondition error for `step`
    pub fn created_story_id(&self, step: &str) -> Result<&str> {
        self.created_story_id
            .as_deref()
            .ok_or_else(|| Error::missing_precondition(step, "a created story id"))
    }

    /// Move the created id over to the deleted slot
    pub fn mark_deleted(&mut self) {
        self.deleted_story_id = self.created_story_id.take();
    }

    /// Id removed by the delete step, or a precondition error for `step`
    pub fn deleted_story_id(&self, step: &str) -> Result<&str> {
        self.deleted_story_id
            .as_deref()
            .ok_or_else(|| Error::missing_precondition(step, "a deleted story id"))
    }

    /// Tear down and hand back the client for release
    pub fn into_client(self) -> StoryClient {
        self.client
    }
}
