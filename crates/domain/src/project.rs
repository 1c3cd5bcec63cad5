use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_core::{AppError, AppResult, NonEmptyString, UserId};

/// Maximum length of project and task titles accepted by the API.
pub const TITLE_MAX_LENGTH: usize = 255;

/// Server-assigned project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(i64);

impl ProjectId {
    /// Wraps a raw identifier returned by the API.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for ProjectId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Project as returned by the projects endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub id: ProjectId,
    /// Display title.
    pub title: String,
    /// Free-form description, if any.
    #[serde(default)]
    pub description: Option<String>,
    /// Team member identifiers.
    #[serde(default)]
    pub team: Vec<UserId>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated payload for creating or editing a project.
///
/// A missing description is left out of the body, so an edit keeps the
/// stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDraft {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ProjectDraft {
    /// Validates a project title and optional description.
    pub fn new(title: impl Into<String>, description: Option<String>) -> AppResult<Self> {
        let title = validate_title(title)?;
        let description = description.filter(|value| !value.trim().is_empty());

        Ok(Self { title, description })
    }

    /// Returns the validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the description, if one was provided.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Trims and validates a project or task title.
pub(crate) fn validate_title(title: impl Into<String>) -> AppResult<String> {
    let title = NonEmptyString::new(title)?;
    let trimmed = title.as_str().trim();

    if trimmed.chars().count() > TITLE_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "title must not exceed {TITLE_MAX_LENGTH} characters"
        )));
    }

    Ok(trimmed.to_owned())
}
