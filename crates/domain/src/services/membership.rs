//! Membership service: role transitions and invite redemption rules.
//!
//! These are pure decision functions over membership snapshots. The
//! API layer fetches the rows, asks these functions whether the
//! transition is allowed, and only then mutates the store. Every
//! rejection is a distinguishable typed outcome so the client can show
//! a specific message.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::group::{GroupRole, GROUP_MEMBER_CAP};
use crate::models::invite::GroupInvite;

/// Rejections for role transitions and departures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MembershipError {
    #[error("Only the group owner can do that")]
    NotAuthorized,

    #[error("That user is not a member of this group")]
    NotAMember,

    #[error("That member is already an owner")]
    AlreadyOwner,

    #[error("Owners cannot be removed from the group")]
    CannotRemoveOwner,

    #[error("You're the owner. Transfer ownership to another member first")]
    OwnerCannotLeave,
}

/// Rejections for invite redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RedemptionError {
    #[error("Invalid or expired invite code")]
    InvalidOrExpired,

    #[error("This invite has reached its maximum uses")]
    MaxUsesReached,

    #[error("This invite has expired")]
    Expired,

    #[error("This group is full")]
    GroupFull,

    #[error("You're already in this group")]
    AlreadyMember,
}

/// Check whether `actor` may promote a member to owner.
///
/// Promotion never demotes the promoter; groups may hold several
/// owners at once.
pub fn check_promotion(
    actor: GroupRole,
    target: Option<GroupRole>,
) -> Result<(), MembershipError> {
    if !actor.can_manage_members() {
        return Err(MembershipError::NotAuthorized);
    }
    match target {
        None => Err(MembershipError::NotAMember),
        Some(GroupRole::Owner) => Err(MembershipError::AlreadyOwner),
        Some(GroupRole::Member) => Ok(()),
    }
}

/// Check whether `actor` may remove `target` from the group.
///
/// Owners are never removable; they must be demoted out of band first,
/// and no such operation exists here, so the removal is always
/// rejected.
pub fn check_removal(actor: GroupRole, target: GroupRole) -> Result<(), MembershipError> {
    if !actor.can_manage_members() {
        return Err(MembershipError::NotAuthorized);
    }
    if target == GroupRole::Owner {
        return Err(MembershipError::CannotRemoveOwner);
    }
    Ok(())
}

/// Check whether a member may leave the group on their own.
pub fn check_leave(role: GroupRole) -> Result<(), MembershipError> {
    if role == GroupRole::Owner {
        return Err(MembershipError::OwnerCannotLeave);
    }
    Ok(())
}

/// Check whether an invite may be redeemed by a prospective member.
///
/// All checks run in a fixed order so rejections are deterministic:
/// active flag, use cap, expiry, group capacity, existing membership.
/// A rejected redemption must never increment the use count — callers
/// only bump it after this returns Ok.
pub fn check_redemption(
    invite: &GroupInvite,
    member_count: i64,
    already_member: bool,
    now: DateTime<Utc>,
) -> Result<(), RedemptionError> {
    if !invite.is_active {
        return Err(RedemptionError::InvalidOrExpired);
    }
    if let Some(max_uses) = invite.max_uses {
        if invite.use_count >= max_uses {
            return Err(RedemptionError::MaxUsesReached);
        }
    }
    if let Some(expires_at) = invite.expires_at {
        if expires_at < now {
            return Err(RedemptionError::Expired);
        }
    }
    if member_count >= GROUP_MEMBER_CAP {
        return Err(RedemptionError::GroupFull);
    }
    if already_member {
        return Err(RedemptionError::AlreadyMember);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn invite() -> GroupInvite {
        GroupInvite {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            token: "ABC-DEF-234".to_string(),
            created_by: Uuid::new_v4(),
            expires_at: None,
            max_uses: None,
            use_count: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    // Promotion

    #[test]
    fn test_owner_promotes_member() {
        assert!(check_promotion(GroupRole::Owner, Some(GroupRole::Member)).is_ok());
    }

    #[test]
    fn test_member_cannot_promote() {
        assert_eq!(
            check_promotion(GroupRole::Member, Some(GroupRole::Member)),
            Err(MembershipError::NotAuthorized)
        );
    }

    #[test]
    fn test_cannot_promote_missing_member() {
        assert_eq!(
            check_promotion(GroupRole::Owner, None),
            Err(MembershipError::NotAMember)
        );
    }

    #[test]
    fn test_cannot_promote_existing_owner() {
        assert_eq!(
            check_promotion(GroupRole::Owner, Some(GroupRole::Owner)),
            Err(MembershipError::AlreadyOwner)
        );
    }

    // Removal

    #[test]
    fn test_owner_removes_member() {
        assert!(check_removal(GroupRole::Owner, GroupRole::Member).is_ok());
    }

    #[test]
    fn test_member_cannot_remove() {
        assert_eq!(
            check_removal(GroupRole::Member, GroupRole::Member),
            Err(MembershipError::NotAuthorized)
        );
    }

    #[test]
    fn test_owner_cannot_be_removed() {
        assert_eq!(
            check_removal(GroupRole::Owner, GroupRole::Owner),
            Err(MembershipError::CannotRemoveOwner)
        );
    }

    // Leaving

    #[test]
    fn test_member_can_leave() {
        assert!(check_leave(GroupRole::Member).is_ok());
    }

    #[test]
    fn test_owner_cannot_leave() {
        // Rejected regardless of member count
        assert_eq!(
            check_leave(GroupRole::Owner),
            Err(MembershipError::OwnerCannotLeave)
        );
    }

    // Redemption

    #[test]
    fn test_redeem_valid_invite() {
        assert!(check_redemption(&invite(), 3, false, Utc::now()).is_ok());
    }

    #[test]
    fn test_redeem_inactive_invite() {
        let mut inv = invite();
        inv.is_active = false;
        assert_eq!(
            check_redemption(&inv, 3, false, Utc::now()),
            Err(RedemptionError::InvalidOrExpired)
        );
    }

    #[test]
    fn test_redeem_at_use_cap() {
        let mut inv = invite();
        inv.max_uses = Some(1);
        inv.use_count = 1;
        assert_eq!(
            check_redemption(&inv, 3, false, Utc::now()),
            Err(RedemptionError::MaxUsesReached)
        );
    }

    #[test]
    fn test_redeem_expired_invite() {
        let mut inv = invite();
        inv.expires_at = Some(Utc::now() - Duration::hours(1));
        assert_eq!(
            check_redemption(&inv, 3, false, Utc::now()),
            Err(RedemptionError::Expired)
        );
    }

    #[test]
    fn test_redeem_full_group() {
        assert_eq!(
            check_redemption(&invite(), GROUP_MEMBER_CAP, false, Utc::now()),
            Err(RedemptionError::GroupFull)
        );
    }

    #[test]
    fn test_redeem_when_already_member() {
        assert_eq!(
            check_redemption(&invite(), 3, true, Utc::now()),
            Err(RedemptionError::AlreadyMember)
        );
    }

    #[test]
    fn test_redeem_checks_run_in_order() {
        // An invite failing every check reports the first one
        let mut inv = invite();
        inv.is_active = false;
        inv.max_uses = Some(1);
        inv.use_count = 1;
        inv.expires_at = Some(Utc::now() - Duration::hours(1));
        assert_eq!(
            check_redemption(&inv, GROUP_MEMBER_CAP, true, Utc::now()),
            Err(RedemptionError::InvalidOrExpired)
        );

        // Use cap is reported before expiry
        let mut inv = invite();
        inv.max_uses = Some(2);
        inv.use_count = 2;
        inv.expires_at = Some(Utc::now() - Duration::hours(1));
        assert_eq!(
            check_redemption(&inv, 3, false, Utc::now()),
            Err(RedemptionError::MaxUsesReached)
        );
    }

    #[test]
    fn test_unlimited_invite_ignores_use_count() {
        let mut inv = invite();
        inv.use_count = 10_000;
        assert!(check_redemption(&inv, 3, false, Utc::now()).is_ok());
    }
}
