//! Response contract checks
//!
//! Each check returns `Error::Assertion` describing what was expected and
//! what came back, so a failed step reads on its own in the report.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::api::HttpReply;
use crate::common::{Error, Result};

/// Longest body excerpt quoted in an assertion message
const BODY_EXCERPT_LEN: usize = 200;

/// Exact status code
pub fn expect_status(reply: &HttpReply, expected: StatusCode) -> Result<()> {
    if reply.status != expected {
        return Err(Error::Assertion(format!(
            "expected status {}, got {} (body: {})",
            expected,
            reply.status,
            excerpt(&reply.body)
        )));
    }
    Ok(())
}

/// Status class: 2xx when `success` is true, anything else otherwise
pub fn expect_success(reply: &HttpReply, success: bool) -> Result<()> {
    if reply.is_success() != success {
        return Err(Error::Assertion(format!(
            "expected a {} status, got {}",
            if success { "success" } else { "non-success" },
            reply.status
        )));
    }
    Ok(())
}

/// Body contains `marker` verbatim
pub fn expect_body_contains(reply: &HttpReply, marker: &str) -> Result<()> {
    if !reply.body.contains(marker) {
        return Err(Error::Assertion(format!(
            "expected body to contain '{}', got: {}",
            marker,
            excerpt(&reply.body)
        )));
    }
    Ok(())
}

/// Body parses as `T`
pub fn expect_json<T: DeserializeOwned>(reply: &HttpReply) -> Result<T> {
    serde_json::from_str(&reply.body).map_err(|e| {
        Error::Assertion(format!(
            "expected a JSON body ({}), got: {}",
            e,
            excerpt(&reply.body)
        ))
    })
}

/// A string field that is present and non-empty
pub fn expect_non_empty(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(Error::Assertion(format!("field '{}' is empty", field))),
        None => Err(Error::Assertion(format!("field '{}' is missing", field))),
    }
}

fn excerpt(body: &str) -> String {
    if body.is_empty() {
        return "<empty>".to_string();
    }
    if body.chars().count() <= BODY_EXCERPT_LEN {
        return body.to_string();
    }
    let cut: String = body.chars().take(BODY_EXCERPT_LEN).collect();
    format!("{}…", cut)
}
