//! Profile domain models.
//!
//! Profiles bridge the external identity provider to our own rows: the
//! provider supplies a stable opaque subject string, everything else
//! lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Profile {
    pub id: Uuid,
    /// Stable subject identifier from the identity provider.
    pub auth_subject: String,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    /// Last computed leaderboard title, e.g. "The Oracle".
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile info (no auth subject).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfileSummary {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub title: String,
}

impl From<&Profile> for ProfileSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            username: profile.username.clone(),
            display_name: profile.display_name.clone(),
            avatar_url: profile.avatar_url.clone(),
            title: profile.title.clone(),
        }
    }
}

/// Defaults used when a profile row is created on first login.
#[derive(Debug, Clone)]
pub struct ProfileDefaults {
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}
