//! Invite domain models for group invitations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a group invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupInvite {
    pub id: Uuid,
    pub group_id: Uuid,
    pub token: String,
    pub created_by: Uuid,
    /// Null means the invite never expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// Null means unlimited uses.
    pub max_uses: Option<i32>,
    pub use_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to join a group using an invite token.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RedeemInviteRequest {
    /// The invite token in XXX-XXX-XXX format.
    #[validate(length(equal = 11, message = "Invalid invite token format"))]
    #[validate(regex(
        path = *INVITE_TOKEN_REGEX,
        message = "Invalid invite token format. Expected XXX-XXX-XXX"
    ))]
    pub token: String,
}

lazy_static::lazy_static! {
    static ref INVITE_TOKEN_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Z0-9]{3}-[A-Z0-9]{3}-[A-Z0-9]{3}$").unwrap();
}

/// Response for the group's shareable invite.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteResponse {
    pub id: Uuid,
    pub group_id: Uuid,
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub use_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Group info returned after a successful join.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JoinGroupInfo {
    pub id: Uuid,
    pub name: String,
    pub member_count: i64,
}

/// Response after joining a group via invite.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JoinGroupResponse {
    pub group: JoinGroupInfo,
    pub role: super::group::GroupRole,
    pub joined_at: DateTime<Utc>,
}

/// Generate a random invite token in XXX-XXX-XXX format.
pub fn generate_invite_token() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let chars: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789"; // Avoiding confusing chars: 0, O, I, 1

    let mut generate_segment = || -> String {
        (0..3)
            .map(|_| {
                let idx = rng.gen_range(0..chars.len());
                chars[idx] as char
            })
            .collect()
    };

    format!(
        "{}-{}-{}",
        generate_segment(),
        generate_segment(),
        generate_segment()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_invite_token_format() {
        let token = generate_invite_token();
        assert_eq!(token.len(), 11); // XXX-XXX-XXX
        assert_eq!(&token[3..4], "-");
        assert_eq!(&token[7..8], "-");

        for (i, c) in token.chars().enumerate() {
            if i == 3 || i == 7 {
                assert_eq!(c, '-');
            } else {
                assert!(
                    c.is_ascii_uppercase() || c.is_ascii_digit(),
                    "Invalid char: {}",
                    c
                );
                assert!(c != 'O' && c != 'I' && c != '0' && c != '1');
            }
        }
    }

    #[test]
    fn test_generate_invite_token_uniqueness() {
        let tokens: Vec<String> = (0..100).map(|_| generate_invite_token()).collect();
        let unique: std::collections::HashSet<_> = tokens.iter().collect();
        // With such a large character space, duplicates should be extremely rare
        assert!(unique.len() >= 99);
    }

    #[test]
    fn test_redeem_invite_request_validation() {
        let valid = RedeemInviteRequest {
            token: "ABC-DEF-234".to_string(),
        };
        assert!(valid.validate().is_ok());

        let lowercase = RedeemInviteRequest {
            token: "abc-def-234".to_string(),
        };
        assert!(lowercase.validate().is_err());

        let wrong_shape = RedeemInviteRequest {
            token: "ABCDEF234".to_string(),
        };
        assert!(wrong_shape.validate().is_err());

        let generated = RedeemInviteRequest {
            token: generate_invite_token(),
        };
        assert!(generated.validate().is_ok());
    }
}
