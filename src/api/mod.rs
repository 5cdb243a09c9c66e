//! Story Spoiler API surface
//!
//! Typed bodies plus a thin reqwest client; contract checks live in
//! [`crate::contract`].

pub mod client;
pub mod types;

pub use client::{HttpReply, StoryClient};
