//! State outcome records returned to the host framework.

use anyhow::Result;
use serde::Serialize;

/// Old/new values recorded when the trust store was (or would be) mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub old: String,
    pub new: String,
}

/// Result record for one state invocation.
///
/// `result` is `Some(true)` for success and no-op, `Some(false)` for failure,
/// and `None` in test mode when the live result cannot be known yet.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub name: String,
    pub changed: bool,
    pub result: Option<bool>,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<Change>,
}

impl Outcome {
    /// Outcome for an invocation that left the trust store alone.
    pub fn unchanged(name: &str, result: Option<bool>, comment: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            changed: false,
            result,
            comment: comment.into(),
            changes: None,
        }
    }

    /// Outcome for an invocation that added (or would add) `alias`.
    pub fn with_change(
        name: &str,
        result: Option<bool>,
        comment: impl Into<String>,
        alias: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            changed: true,
            result,
            comment: comment.into(),
            changes: Some(Change {
                old: String::new(),
                new: alias.to_string(),
            }),
        }
    }

    /// Render the record as JSON for the host framework.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Result codes for live vs test (dry-run) application.
///
/// Under test mode success and failure both map to "unknown" so the host
/// framework renders the state as pending rather than applied.
#[derive(Debug, Clone, Copy)]
pub struct ResultCodes {
    pub none: Option<bool>,
    pub failure: Option<bool>,
    pub success: Option<bool>,
}

impl ResultCodes {
    pub fn for_mode(test: bool) -> Self {
        if test {
            Self {
                none: Some(true),
                failure: None,
                success: None,
            }
        } else {
            Self {
                none: Some(true),
                failure: Some(false),
                success: Some(true),
            }
        }
    }
}
