//! The ordered steps of a contract run
//!
//! Each step issues one request through the [`RunContext`] client and checks
//! the documented answer. [`plan`] fixes the order they run in.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::types::{ApiMessage, Story, StoryPayload};
use crate::common::{Error, Result};

use super::assert::{
    expect_body_contains, expect_json, expect_non_empty, expect_status, expect_success,
};
use super::context::RunContext;

pub const CREATED_MARKER: &str = "Successfully created!";
pub const EDITED_MARKER: &str = "Successfully edited";
pub const DELETED_MARKER: &str = "Deleted successfully!";
pub const NOT_FOUND_MARKER: &str = "No spoilers...";
pub const DELETE_REJECTED_MARKER: &str = "Unable to delete this story spoiler!";

/// One ordered HTTP interaction plus its response assertion
#[async_trait]
pub trait Step: Send + Sync {
    /// Short machine-friendly name, used in reports
    fn name(&self) -> &'static str;

    /// The contract the step checks, in words
    fn contract(&self) -> &'static str;

    async fn run(&self, ctx: &mut RunContext) -> Result<()>;
}

/// The steps in execution order
///
/// Positive path first (create, edit, list, delete), then the negative
/// checks. `verify_deletion` slots an extra listing right after the delete.
pub fn plan(verify_deletion: bool) -> Vec<Box<dyn Step>> {
    let mut steps: Vec<Box<dyn Step>> = vec![
        Box::new(CreateStory),
        Box::new(EditCreatedStory),
        Box::new(ListStories),
        Box::new(DeleteCreatedStory),
    ];
    if verify_deletion {
        steps.push(Box::new(VerifyStoryDeleted));
    }
    steps.push(Box::new(CreateStoryWithoutRequiredFields));
    steps.push(Box::new(EditMissingStory));
    steps.push(Box::new(DeleteMissingStory));
    steps
}

pub struct CreateStory;

#[async_trait]
impl Step for CreateStory {
    fn name(&self) -> &'static str {
        "create_story"
    }

    fn contract(&self) -> &'static str {
        "POST /api/Story/Create with all fields -> 201, 'Successfully created!', storyId"
    }

    async fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let reply = ctx.client().create(&ctx.fixtures().story).await?;

        expect_success(&reply, true)?;
        expect_status(&reply, StatusCode::CREATED)?;
        expect_body_contains(&reply, CREATED_MARKER)?;
        let message: ApiMessage = expect_json(&reply)?;
        let id = expect_non_empty("storyId", message.story_id)?;

        tracing::debug!(story_id = %id, "captured created story id");
        ctx.remember_created(id);
        Ok(())
    }
}

pub struct EditCreatedStory;

#[async_trait]
impl Step for EditCreatedStory {
    fn name(&self) -> &'static str {
        "edit_story"
    }

    fn contract(&self) -> &'static str {
        "PUT /api/Story/Edit/{created id} -> 200, 'Successfully edited'"
    }

    async fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let id = ctx.created_story_id(self.name())?;
        let reply = ctx.client().edit(id, &ctx.fixtures().edited_story).await?;

        expect_success(&reply, true)?;
        expect_status(&reply, StatusCode::OK)?;
        expect_body_contains(&reply, EDITED_MARKER)
    }
}

pub struct ListStories;

#[async_trait]
impl Step for ListStories {
    fn name(&self) -> &'static str {
        "list_stories"
    }

    fn contract(&self) -> &'static str {
        "GET /api/Story/All -> 200, non-empty array"
    }

    async fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let reply = ctx.client().list().await?;

        expect_success(&reply, true)?;
        expect_status(&reply, StatusCode::OK)?;
        let stories: Vec<Story> = expect_json(&reply)?;
        if stories.is_empty() {
            return Err(Error::Assertion(
                "expected at least one story in the listing, got none".to_string(),
            ));
        }
        tracing::debug!(count = stories.len(), "listed stories");
        Ok(())
    }
}

pub struct DeleteCreatedStory;

#[async_trait]
impl Step for DeleteCreatedStory {
    fn name(&self) -> &'static str {
        "delete_story"
    }

    fn contract(&self) -> &'static str {
        "DELETE /api/Story/Delete/{created id} -> 200, 'Deleted successfully!'"
    }

    async fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let id = ctx.created_story_id(self.name())?;
        let reply = ctx.client().delete(id).await?;

        expect_success(&reply, true)?;
        expect_status(&reply, StatusCode::OK)?;
        expect_body_contains(&reply, DELETED_MARKER)?;

        ctx.mark_deleted();
        Ok(())
    }
}

pub struct VerifyStoryDeleted;

#[async_trait]
impl Step for VerifyStoryDeleted {
    fn name(&self) -> &'static str {
        "verify_story_deleted"
    }

    fn contract(&self) -> &'static str {
        "GET /api/Story/All -> 200, deleted id no longer listed"
    }

    async fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let id = ctx.deleted_story_id(self.name())?;
        let reply = ctx.client().list().await?;

        expect_status(&reply, StatusCode::OK)?;
        let stories: Vec<Story> = expect_json(&reply)?;
        if stories.iter().any(|s| s.id.as_deref() == Some(id)) {
            return Err(Error::Assertion(format!(
                "story '{}' is still listed after deletion",
                id
            )));
        }
        Ok(())
    }
}

pub struct CreateStoryWithoutRequiredFields;

#[async_trait]
impl Step for CreateStoryWithoutRequiredFields {
    fn name(&self) -> &'static str {
        "create_story_missing_fields"
    }

    fn contract(&self) -> &'static str {
        "POST /api/Story/Create with only url -> 400"
    }

    async fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let reply = ctx.client().create(&StoryPayload::url_only("")).await?;

        expect_success(&reply, false)?;
        expect_status(&reply, StatusCode::BAD_REQUEST)
    }
}

pub struct EditMissingStory;

#[async_trait]
impl Step for EditMissingStory {
    fn name(&self) -> &'static str {
        "edit_missing_story"
    }

    fn contract(&self) -> &'static str {
        "PUT /api/Story/Edit/{missing id} -> 404, 'No spoilers...'"
    }

    async fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let fixtures = ctx.fixtures();
        let reply = ctx
            .client()
            .edit(&fixtures.missing_story_id, &fixtures.edited_story)
            .await?;

        expect_success(&reply, false)?;
        expect_status(&reply, StatusCode::NOT_FOUND)?;
        expect_body_contains(&reply, NOT_FOUND_MARKER)
    }
}

pub struct DeleteMissingStory;

#[async_trait]
impl Step for DeleteMissingStory {
    fn name(&self) -> &'static str {
        "delete_missing_story"
    }

    fn contract(&self) -> &'static str {
        "DELETE /api/Story/Delete/{missing id} -> 400, 'Unable to delete this story spoiler!'"
    }

    async fn run(&self, ctx: &mut RunContext) -> Result<()> {
        let reply = ctx
            .client()
            .delete(&ctx.fixtures().missing_story_id)
            .await?;

        expect_success(&reply, false)?;
        expect_status(&reply, StatusCode::BAD_REQUEST)?;
        expect_body_contains(&reply, DELETE_REJECTED_MARKER)
    }
}
