//! Group domain models for prediction groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::profile::ProfileSummary;

/// Hard cap on members per group. Checked at join time; a concurrent
/// join race at the boundary may overshoot by one (accepted).
pub const GROUP_MEMBER_CAP: i64 = 25;

/// Role within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupRole {
    Owner,
    Member,
}

impl GroupRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupRole::Owner => "owner",
            GroupRole::Member => "member",
        }
    }

    /// Returns true if this role can promote or remove members.
    pub fn can_manage_members(&self) -> bool {
        matches!(self, GroupRole::Owner)
    }

    /// Returns true if this role can rename or delete the group.
    pub fn can_manage_group(&self) -> bool {
        matches!(self, GroupRole::Owner)
    }
}

impl FromStr for GroupRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(GroupRole::Owner),
            "member" => Ok(GroupRole::Member),
            _ => Err(format!("Invalid group role: {}", s)),
        }
    }
}

impl fmt::Display for GroupRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a prediction group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Represents a user's membership in a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupMember {
    pub id: Uuid,
    pub group_id: Uuid,
    pub profile_id: Uuid,
    pub role: GroupRole,
    pub joined_at: DateTime<Utc>,
}

/// Request payload for creating a group.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGroupRequest {
    #[validate(custom(function = "shared::validation::validate_group_name"))]
    pub name: String,
}

/// Request payload for renaming a group.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RenameGroupRequest {
    #[validate(custom(function = "shared::validation::validate_group_name"))]
    pub name: String,
}

/// Summary of a group for the user's group list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupSummary {
    pub id: Uuid,
    pub name: String,
    pub member_count: i64,
    pub your_role: GroupRole,
    pub your_rank: Option<i64>,
    pub joined_at: DateTime<Utc>,
}

/// Response for listing the user's groups.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListGroupsResponse {
    pub data: Vec<GroupSummary>,
    pub count: usize,
}

/// Member entry in a group detail response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberResponse {
    pub id: Uuid,
    pub profile: ProfileSummary,
    pub role: GroupRole,
    pub joined_at: DateTime<Utc>,
}

/// Response for group detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupDetail {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub member_count: i64,
    pub your_role: GroupRole,
    pub members: Vec<MemberResponse>,
}

/// Response for creating a group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateGroupResponse {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub member_count: i64,
    pub your_role: GroupRole,
    pub invite_token: String,
}

/// Response when removing a member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoveMemberResponse {
    pub removed: bool,
    pub profile_id: Uuid,
    pub group_id: Uuid,
}

/// Response after promoting a member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PromoteMemberResponse {
    pub group_id: Uuid,
    pub profile_id: Uuid,
    pub role: GroupRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_role_as_str() {
        assert_eq!(GroupRole::Owner.as_str(), "owner");
        assert_eq!(GroupRole::Member.as_str(), "member");
    }

    #[test]
    fn test_group_role_from_str() {
        assert_eq!(GroupRole::from_str("owner").unwrap(), GroupRole::Owner);
        assert_eq!(GroupRole::from_str("MEMBER").unwrap(), GroupRole::Member);
        assert!(GroupRole::from_str("admin").is_err());
    }

    #[test]
    fn test_group_role_display() {
        assert_eq!(format!("{}", GroupRole::Owner), "owner");
        assert_eq!(format!("{}", GroupRole::Member), "member");
    }

    #[test]
    fn test_group_role_permissions() {
        assert!(GroupRole::Owner.can_manage_members());
        assert!(GroupRole::Owner.can_manage_group());
        assert!(!GroupRole::Member.can_manage_members());
        assert!(!GroupRole::Member.can_manage_group());
    }

    #[test]
    fn test_create_group_request_validation() {
        let valid = CreateGroupRequest {
            name: "Fight Club".to_string(),
        };
        assert!(valid.validate().is_ok());

        let too_short = CreateGroupRequest {
            name: "X".to_string(),
        };
        assert!(too_short.validate().is_err());

        let too_long = CreateGroupRequest {
            name: "x".repeat(51),
        };
        assert!(too_long.validate().is_err());

        // Length is measured after trimming
        let padded = CreateGroupRequest {
            name: "  A  ".to_string(),
        };
        assert!(padded.validate().is_err());
    }
}
