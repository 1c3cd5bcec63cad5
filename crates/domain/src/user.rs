//! Users listed by the directory endpoint.

use serde::{Deserialize, Serialize};
use taskdeck_core::{Role, UserId};

/// User as returned by the users endpoint.
///
/// Only the identifying fields are guaranteed; profile fields are often blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// User identifier.
    pub id: UserId,
    /// Account username.
    pub username: String,
    /// Account role.
    pub role: Role,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
}

impl DirectoryUser {
    /// Returns "First Last" when both names are present, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (non_blank(&self.first_name), non_blank(&self.last_name)) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(single), None) | (None, Some(single)) => single.to_owned(),
            (None, None) => self.username.clone(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
